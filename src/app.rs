use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate_form))
        .route("/toggle/:index", post(handlers::toggle_form))
        .route("/clear", post(handlers::clear_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/generate", post(handlers::generate))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/clear", post(handlers::clear))
        .with_state(state)
}
