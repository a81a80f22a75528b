use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{leaderboard::LeaderboardEntry, participant::RankedParticipantResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/leaderboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Leaderboard refreshed and returned", body = Vec<LeaderboardEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage unavailable")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, WebError> {
    let entries = services::refresh_leaderboard(&state).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Approved participants in last-refresh order", body = Vec<RankedParticipantResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "leaderboard"
)]
pub async fn list_ranked_participants(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, WebError> {
    let participants = services::list_ranked(state.db.pool()).await?;

    let response: Vec<RankedParticipantResponse> = participants
        .into_iter()
        .map(RankedParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
