mod participant;
mod wallet_address;

pub use participant::{Participant, ROLE_ADMIN, ROLE_USER};
pub use wallet_address::WalletAddress;
