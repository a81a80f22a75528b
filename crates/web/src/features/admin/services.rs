use sqlx::PgPool;
use storage::{
    dto::participant::{ApprovalStatus, UpdateParticipantRequest},
    models::{Participant, WalletAddress},
    repository::participant::ParticipantRepository,
};
use uuid::Uuid;

use crate::error::WebError;

/// Non-admin accounts, newest first, optionally filtered by approval state.
pub async fn list_participants(
    pool: &PgPool,
    status: ApprovalStatus,
) -> Result<Vec<Participant>, WebError> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.list(status).await?)
}

pub async fn approve_participant(pool: &PgPool, id: Uuid) -> Result<Participant, WebError> {
    let repo = ParticipantRepository::new(pool);

    let participant = repo.find_by_id(id).await?;
    if participant.is_admin() {
        return Err(WebError::BadRequest(
            "admin accounts cannot be approved".to_string(),
        ));
    }

    let approved = repo.approve(id).await?;
    tracing::info!(username = %approved.username, "participant approved");

    Ok(approved)
}

pub async fn reject_participant(pool: &PgPool, id: Uuid) -> Result<(), WebError> {
    let repo = ParticipantRepository::new(pool);

    let participant = repo.find_by_id(id).await?;
    if participant.is_admin() {
        return Err(WebError::BadRequest(
            "admin accounts cannot be deleted".to_string(),
        ));
    }

    repo.delete(id).await?;
    tracing::info!(username = %participant.username, "participant rejected and removed");

    Ok(())
}

/// Apply admin edits, re-checking uniqueness against other rows.
pub async fn update_participant(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateParticipantRequest,
) -> Result<Participant, WebError> {
    let repo = ParticipantRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let username = match &req.username {
        Some(raw) => {
            let username = raw.trim().to_string();
            if let Some(other) = repo.find_by_username(&username).await? {
                if other.participant_id != id {
                    return Err(WebError::Conflict("username is already taken".to_string()));
                }
            }
            Some(username)
        }
        None => None,
    };

    let wallet_address = match &req.wallet_address {
        Some(raw) => {
            let wallet = WalletAddress::parse(raw).map_err(WebError::BadRequest)?;
            if let Some(other) = repo.find_by_wallet(wallet.as_str()).await? {
                if other.participant_id != id {
                    return Err(WebError::Conflict(
                        "wallet address is already registered".to_string(),
                    ));
                }
            }
            Some(wallet.into_string())
        }
        None => None,
    };

    let updated = repo
        .update(
            id,
            &existing,
            username.as_deref(),
            wallet_address.as_deref(),
            req.profile_image_url.as_deref(),
        )
        .await?;

    Ok(updated)
}
