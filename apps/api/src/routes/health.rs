use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Plain liveness check for the web client.
pub async fn status_handler() -> Json<Value> {
    Json(json!({ "status": "AI Job Assistant is running!" }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "job-assistant"
    }))
}
