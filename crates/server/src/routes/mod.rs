//! API route handlers
//!
//! - `suggest`: word suggestions by path or query string
//! - `corpus`: corpus statistics and reload
//! - `health`: liveness, readiness and metrics

pub mod corpus;
pub mod health;
pub mod suggest;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// API version and base info
pub async fn api_info(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let search = state.service.matcher().config();
    Ok(Json(json!({
        "name": "wordsim",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "model": state.service.embedder().model_name(),
        "top_k": search.top_k,
        "endpoints": [
            "/{phrase}",
            "/api/v1/suggest",
            "/api/v1/corpus",
            "/api/v1/corpus/reload",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
