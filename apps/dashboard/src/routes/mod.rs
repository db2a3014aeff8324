pub mod handlers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/navigate", post(handlers::handle_navigate))
        .route("/api/v1/action", post(handlers::handle_action))
        .route("/api/v1/current", get(handlers::handle_current))
        .with_state(state)
}
