pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{HyperliquidClient, MAINNET_API_URL};
pub use error::{OracleError, Result};
pub use traits::BalanceOracle;
