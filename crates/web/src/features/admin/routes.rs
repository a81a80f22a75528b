use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{
    approve_participant, list_participants, reject_participant, update_participant,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_participants))
        .route("/users/:id/approve", post(approve_participant))
        .route("/users/:id", delete(reject_participant))
        .route("/users/:id", put(update_participant))
}
