pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::status_handler))
        .route("/health", get(health::health_handler))
        .route("/chat", post(handlers::handle_chat))
        .fallback(not_found)
        .with_state(state)
}
