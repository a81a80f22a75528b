use axum::{Json, Router, routing::get};
use serde_json::json;

use crate::features::{admin, auth, leaderboard};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(leaderboard::routes::routes())
        .nest("/api/auth", auth::routes::routes())
        .nest("/api/admin", admin::routes::routes())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "online",
        "message": "Trading Competition API"
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "database": "connected"
    }))
}
