use std::sync::Arc;

use crate::chat::controller::ChatService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Dialogue controller with its session store, model-backed capabilities
    /// and job source already wired in.
    pub chat: Arc<ChatService>,
}
