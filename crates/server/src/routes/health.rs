use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "wordsim-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// Readiness check endpoint
/// Returns 200 once the corpus can be loaded, 503 otherwise
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let corpus = state.service.load_corpus().await?;

    Ok(Json(json!({
        "status": "ready",
        "service": "wordsim-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "components": {
            "corpus": {
                "status": "ready",
                "entries": corpus.len(),
                "dimension": corpus.dimension(),
            },
            "embedder": {
                "status": "ready",
                "model": state.service.embedder().model_name(),
            },
        }
    })))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let handle = state.metrics.as_ref().ok_or(ServerError::MetricsDisabled)?;
    Ok((
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
