use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shown when a participant never uploaded an avatar.
pub const DEFAULT_AVATAR_URL: &str = "/images/avatars/default.jpg";

/// One ranked row of a completed refresh cycle.
///
/// `account_value` keeps its original camelCase wire name; the frontend
/// consumes it as `accountValue`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub address: String,
    pub name: String,
    pub avatar: String,
    #[serde(rename = "accountValue")]
    pub account_value: f64,
    pub initial_balance: f64,
    /// Signed percentage change versus the initial balance, zero-guarded.
    pub profit_rate: f64,
    pub rank: i64,
}
