use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{login, me, register};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
