use crate::error::Result;

/// External venue reporting the authoritative account value for a wallet.
///
/// The refresh pipeline takes this as an injected dependency so tests can
/// substitute a mock, and so process-wide state stays limited to connection
/// pooling inside the HTTP client.
#[async_trait::async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Current margin-inclusive account value for `address`; may legitimately
    /// be negative when the account is in debt.
    async fn account_value(&self, address: &str) -> Result<f64>;
}
