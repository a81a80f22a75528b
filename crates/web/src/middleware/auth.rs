use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::{Participant, ROLE_ADMIN};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
}

pub fn create_access_token(secret: &str, participant: &Participant) -> Result<String, WebError> {
    let claims = Claims {
        sub: participant.participant_id,
        username: participant.username.clone(),
        role: participant.role.clone(),
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| WebError::InternalServerError(format!("failed to sign token: {e}")))
}

fn decode_claims(secret: &str, token: &str) -> Result<Claims, WebError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| WebError::Unauthorized("invalid or expired token".to_string()))
}

/// Claims of the authenticated participant, extracted from a bearer token.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| WebError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| WebError::Unauthorized("expected bearer token".to_string()))?;

        Ok(Self(decode_claims(&state.jwt_secret, token)?))
    }
}

/// Like [`AuthUser`], but additionally requires the admin role.
pub struct AdminUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != ROLE_ADMIN {
            return Err(WebError::Forbidden("admin privileges required".to_string()));
        }

        Ok(Self(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn participant(role: &str) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            wallet_address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            profile_image_url: None,
            role: role.to_string(),
            is_approved: true,
            is_active: true,
            initial_balance: None,
            current_balance: None,
            profit_rate: Decimal::ZERO,
            rank: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let p = participant("user");
        let token = create_access_token("secret", &p).unwrap();
        let claims = decode_claims("secret", &token).unwrap();

        assert_eq!(claims.sub, p.participant_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token("secret", &participant("user")).unwrap();
        assert!(decode_claims("other-secret", &token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_claims("secret", "not.a.token").is_err());
    }
}
