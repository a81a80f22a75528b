use std::sync::Arc;

use oracle::BalanceOracle;
use storage::Database;
use storage::services::ranking::FailedFetchPolicy;
use tokio::sync::Mutex;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub oracle: Arc<dyn BalanceOracle>,
    pub jwt_secret: String,
    pub failed_fetch_policy: FailedFetchPolicy,
    /// Single-flight guard: overlapping refresh triggers queue behind the one
    /// in progress instead of racing each other on the write-back.
    pub refresh_lock: Arc<Mutex<()>>,
}
