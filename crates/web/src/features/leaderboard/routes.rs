use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, list_ranked_participants};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/api/users", get(list_ranked_participants))
}
