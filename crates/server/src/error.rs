use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use wordsim::PipelineError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Metrics are disabled")]
    MetricsDisabled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound | ServerError::MetricsDisabled => StatusCode::NOT_FOUND,
            ServerError::Pipeline(err) => match err {
                PipelineError::Corpus(_) => StatusCode::SERVICE_UNAVAILABLE,
                PipelineError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                PipelineError::Embedding(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Match(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Pipeline(err) => match err {
                PipelineError::Corpus(_) => "CORPUS_UNAVAILABLE",
                PipelineError::Timeout { .. } => "TIMEOUT",
                PipelineError::Embedding(_) => "EMBEDDING_ERROR",
                PipelineError::Match(_) => "MATCH_ERROR",
                PipelineError::Task(_) => "INTERNAL_ERROR",
            },
            ServerError::MetricsDisabled => "METRICS_DISABLED",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request_failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<wordsim::ConfigLoadError> for ServerError {
    fn from(err: wordsim::ConfigLoadError) -> Self {
        ServerError::Config(err.to_string())
    }
}
