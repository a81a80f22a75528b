use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    auth::{LoginRequest, RegisterResponse, TokenResponse},
    participant::{ParticipantResponse, RegisterRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration accepted, pending admin approval", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or wallet address already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::register(&state, &req).await?;

    let body = RegisterResponse {
        success: true,
        message: format!(
            "{}, your registration is in! An administrator will review it shortly.",
            participant.username
        ),
        participant_id: participant.participant_id,
    };

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account pending approval or deactivated")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (access_token, participant) = services::login(&state, &req).await?;

    let body = TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: ParticipantResponse::from(participant),
    };

    Ok(Json(body).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current participant", body = ParticipantResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Response, WebError> {
    let participant = services::current_participant(&state, claims.sub).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}
