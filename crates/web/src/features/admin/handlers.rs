use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::participant::{
    ParticipantListFilter, ParticipantResponse, UpdateParticipantRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(ParticipantListFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant accounts", body = Vec<ParticipantResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required")
    ),
    tag = "admin"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<ParticipantListFilter>,
) -> Result<Response, WebError> {
    let participants = services::list_participants(state.db.pool(), filter.status).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant approved", body = ParticipantResponse),
        (status = 400, description = "Admin accounts cannot be approved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Participant not found")
    ),
    tag = "admin"
)]
pub async fn approve_participant(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participant = services::approve_participant(state.db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant rejected and removed"),
        (status = 400, description = "Admin accounts cannot be deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Participant not found")
    ),
    tag = "admin"
)]
pub async fn reject_participant(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::reject_participant(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Participant not found"),
        (status = 409, description = "Username or wallet address already taken")
    ),
    tag = "admin"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_participant(state.db.pool(), id, &req).await?;

    Ok(Json(ParticipantResponse::from(updated)).into_response())
}
