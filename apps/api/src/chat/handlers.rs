//! Axum route handlers for the Chat API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::chat::controller::ChatReply;
use crate::errors::AppError;
use crate::state::AppState;

pub const DEFAULT_CONVERSATION_ID: &str = "default-session";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default = "default_conversation_id")]
    pub conversation_id: String,
}

fn default_conversation_id() -> String {
    DEFAULT_CONVERSATION_ID.to_string()
}

/// POST /chat
///
/// Routes the query to job search, career advice or a greeting and returns the
/// assistant's reply, with matching jobs attached for successful searches.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let span = info_span!(
        "chat",
        request_id = %Uuid::new_v4(),
        conversation_id = %request.conversation_id,
    );

    // Logged here so the error carries the request span's fields.
    let reply = async {
        state
            .chat
            .handle(&request.conversation_id, &request.query)
            .await
            .map_err(|e| {
                tracing::error!(
                    category = e.category(),
                    transport = e.is_transport(),
                    "Chat turn failed: {e}"
                );
                e
            })
    }
    .instrument(span)
    .await?;

    Ok(Json(reply))
}
