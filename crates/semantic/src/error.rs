use thiserror::Error;

/// Errors surfaced by an [`Embedder`](crate::Embedder).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SemanticError {
    /// Configuration is inconsistent (e.g. `api` mode without an `api_url`).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// Transport failure before any response arrived.
    #[error("embedding request failed: {0}")]
    Request(String),
    /// The provider answered with a non-success status.
    #[error("embedding provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The provider answered, but not with a usable embedding.
    #[error("inference failure: {0}")]
    Inference(String),
    /// Input text was empty after trimming.
    #[error("cannot embed empty text")]
    EmptyInput,
}

impl SemanticError {
    /// Whether retrying the same call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SemanticError::Request(_) => true,
            SemanticError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
