use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub wallet_address: String,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    /// Account value captured once at registration; NULL when the venue was
    /// unreachable at that time.
    pub initial_balance: Option<Decimal>,
    /// Last successfully observed account value; NULL until the first refresh.
    pub current_balance: Option<Decimal>,
    pub profit_rate: Decimal,
    /// Dense 1-based position from the last completed refresh.
    pub rank: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl Participant {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
