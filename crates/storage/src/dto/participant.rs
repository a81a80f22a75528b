use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Participant, WalletAddress};

fn validate_wallet_address(value: &str) -> Result<(), ValidationError> {
    WalletAddress::parse(value).map(|_| ()).map_err(|_| {
        ValidationError::new("wallet_address")
            .with_message("must be 0x followed by exactly 40 hex digits".into())
    })
}

fn validate_username(value: &str) -> Result<(), ValidationError> {
    // Length is checked on the trimmed name, which is what gets persisted.
    let len = value.trim().chars().count();
    if (2..=50).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("username must be 2-50 characters".into()))
    }
}

fn validate_pin(value: &str) -> Result<(), ValidationError> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("password")
            .with_message("password must be exactly 4 digits".into()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(custom(function = validate_pin))]
    pub password: String,
    #[validate(custom(function = validate_wallet_address))]
    pub wallet_address: String,
    #[validate(url(message = "profile_image_url must be a valid URL"))]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(custom(function = validate_username))]
    pub username: Option<String>,
    #[validate(custom(function = validate_wallet_address))]
    pub wallet_address: Option<String>,
    #[validate(url(message = "profile_image_url must be a valid URL"))]
    pub profile_image_url: Option<String>,
}

/// Insert payload built by the registration service once the password is
/// hashed and the wallet address normalized.
#[derive(Debug)]
pub struct NewParticipant {
    pub username: String,
    pub password_hash: String,
    pub wallet_address: String,
    pub profile_image_url: Option<String>,
    pub initial_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    #[default]
    All,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ParticipantListFilter {
    #[serde(default)]
    pub status: ApprovalStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub username: String,
    pub wallet_address: String,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub initial_balance: Option<f64>,
    pub current_balance: Option<f64>,
    pub profit_rate: f64,
    pub rank: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_id: p.participant_id,
            username: p.username,
            wallet_address: p.wallet_address,
            profile_image_url: p.profile_image_url,
            role: p.role,
            is_approved: p.is_approved,
            is_active: p.is_active,
            initial_balance: p.initial_balance.and_then(|d| d.to_f64()),
            current_balance: p.current_balance.and_then(|d| d.to_f64()),
            profit_rate: p.profit_rate.to_f64().unwrap_or(0.0),
            rank: p.rank,
            created_at: p.created_at,
        }
    }
}

/// Slim entry for the persisted-standings listing (`/api/users`).
#[derive(Debug, Serialize, ToSchema)]
pub struct RankedParticipantResponse {
    pub participant_id: Uuid,
    pub username: String,
    pub wallet_address: String,
    pub profile_image_url: Option<String>,
    pub profit_rate: f64,
    pub rank: Option<i32>,
}

impl From<Participant> for RankedParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_id: p.participant_id,
            username: p.username,
            wallet_address: p.wallet_address,
            profile_image_url: p.profile_image_url,
            profit_rate: p.profit_rate.to_f64().unwrap_or(0.0),
            rank: p.rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_must_be_four_digits() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("12a4").is_err());
    }

    #[test]
    fn test_username_length_checked_after_trimming() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("  alice  ").is_ok());
        // Padding must not smuggle a too-short name past the check.
        assert!(validate_username(" a ").is_err());
        assert!(validate_username("a").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_register_request_rejects_whitespace_padded_short_username() {
        let req = RegisterRequest {
            username: " a ".to_string(),
            password: "1234".to_string(),
            wallet_address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            profile_image_url: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_bad_wallet() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            password: "1234".to_string(),
            wallet_address: "0xnothex".to_string(),
            profile_image_url: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_valid_input() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            password: "1234".to_string(),
            wallet_address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            profile_image_url: Some("https://example.com/a.webp".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
