use bcrypt::{DEFAULT_COST, hash, verify};
use rust_decimal::Decimal;
use storage::{
    dto::auth::LoginRequest,
    dto::participant::{NewParticipant, RegisterRequest},
    models::{Participant, WalletAddress},
    repository::participant::ParticipantRepository,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::create_access_token;
use crate::state::AppState;

/// Register a new participant, pending admin approval. The initial balance is
/// captured from the venue best-effort: an outage leaves it unset rather than
/// blocking the signup.
pub async fn register(state: &AppState, req: &RegisterRequest) -> Result<Participant, WebError> {
    let username = req.username.trim().to_string();
    let wallet = WalletAddress::parse(&req.wallet_address).map_err(WebError::BadRequest)?;

    let repo = ParticipantRepository::new(state.db.pool());

    if repo.find_by_username(&username).await?.is_some() {
        return Err(WebError::Conflict("username is already taken".to_string()));
    }
    if repo.find_by_wallet(wallet.as_str()).await?.is_some() {
        return Err(WebError::Conflict(
            "wallet address is already registered".to_string(),
        ));
    }

    let password_hash = hash(&req.password, DEFAULT_COST)
        .map_err(|e| WebError::InternalServerError(format!("failed to hash password: {e}")))?;

    let initial_balance = match state.oracle.account_value(wallet.as_str()).await {
        Ok(value) => Decimal::from_f64_retain(value),
        Err(error) => {
            tracing::warn!(wallet = %wallet, %error, "initial balance lookup failed");
            None
        }
    };

    let new_participant = NewParticipant {
        username,
        password_hash,
        wallet_address: wallet.into_string(),
        profile_image_url: req.profile_image_url.clone(),
        initial_balance,
    };

    let participant = repo.create(&new_participant).await.map_err(|e| {
        // Backstop for a concurrent signup racing past the pre-checks.
        if e.is_unique_violation() {
            WebError::Conflict("username or wallet address already registered".to_string())
        } else {
            WebError::from(e)
        }
    })?;

    tracing::info!(username = %participant.username, "participant registered, awaiting approval");

    Ok(participant)
}

pub async fn login(state: &AppState, req: &LoginRequest) -> Result<(String, Participant), WebError> {
    let repo = ParticipantRepository::new(state.db.pool());

    let participant = repo
        .find_by_username(req.username.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_ok = verify(&req.password, &participant.password_hash).map_err(|e| {
        WebError::InternalServerError(format!("password verification failed: {e}"))
    })?;
    if !password_ok {
        return Err(invalid_credentials());
    }

    if !participant.is_approved {
        return Err(WebError::Forbidden(
            "account is pending admin approval".to_string(),
        ));
    }
    if !participant.is_active {
        return Err(WebError::Forbidden("account is deactivated".to_string()));
    }

    let token = create_access_token(&state.jwt_secret, &participant)?;

    Ok((token, participant))
}

pub async fn current_participant(state: &AppState, id: Uuid) -> Result<Participant, WebError> {
    let repo = ParticipantRepository::new(state.db.pool());
    Ok(repo.find_by_id(id).await?)
}

fn invalid_credentials() -> WebError {
    WebError::Unauthorized("invalid username or password".to_string())
}
