//! Embedding Boundary
//!
//! Turns a word or short phrase into a dense vector that can be compared with
//! the corpus. Everything upstream talks to an [`Embedder`] trait object, so the
//! model behind it can be swapped without touching the search path.
//!
//! Two implementations ship here:
//!
//! - **Stub mode** ([`StubEmbedder`]) - deterministic hash-seeded vectors. No
//!   network, no model files. Good for tests and local runs.
//! - **API mode** ([`ApiEmbedder`]) - POSTs the text to an HTTP inference
//!   endpoint (Hugging Face, OpenAI, or a custom `{"text": ...}` service) and
//!   retries transient failures with exponential backoff.
//!
//! Build the embedder once at startup with [`build_embedder`] and share the
//! returned `Arc` across requests; the API client pools its connections.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{build_embedder, SemanticConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let cfg = SemanticConfig {
//!     stub_dimension: 16,
//!     ..Default::default()
//! };
//! let embedder = build_embedder(&cfg).unwrap();
//! let embedding = embedder.embed("kitten").await.unwrap();
//! assert_eq!(embedding.embedding_dim, 16);
//! # });
//! ```
//!
//! ## Env vars to know
//!
//! - `WORDSIM_EMBED_API_URL` - Override the API endpoint
//! - `WORDSIM_EMBED_API_TOKEN` - Bearer token sent in the `Authorization` header

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

pub mod config;
pub mod error;
pub mod retry;
pub mod types;

mod api;
mod normalize;
mod serde_millis;
mod stub;

pub use crate::api::ApiEmbedder;
pub use crate::config::{SemanticConfig, API_TOKEN_ENV, API_URL_ENV};
pub use crate::error::SemanticError;
pub use crate::retry::RetryConfig;
pub use crate::stub::StubEmbedder;
pub use crate::types::SemanticEmbedding;

/// Text to vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one piece of text. Blank input is [`SemanticError::EmptyInput`].
    async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError>;

    fn model_name(&self) -> &str;
}

#[async_trait]
impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError> {
        (**self).embed(text).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Validate `cfg` and build the embedder it selects.
pub fn build_embedder(cfg: &SemanticConfig) -> Result<Arc<dyn Embedder>, SemanticError> {
    cfg.validate()?;
    let embedder: Arc<dyn Embedder> = match cfg.mode.as_str() {
        "api" => Arc::new(ApiEmbedder::new(cfg)?),
        _ => Arc::new(StubEmbedder::from_config(cfg)),
    };
    info!(
        mode = %cfg.mode,
        model = embedder.model_name(),
        provider = cfg.api_provider.as_deref().unwrap_or("custom"),
        "embedder_ready"
    );
    Ok(embedder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_stub_by_default() {
        let embedder = build_embedder(&SemanticConfig::default()).unwrap();
        assert_eq!(embedder.model_name(), "stub:universal-sentence-encoder");
    }

    #[test]
    fn builds_api_embedder_when_configured() {
        let cfg = SemanticConfig {
            mode: "api".into(),
            api_url: Some("http://127.0.0.1:9/embed".into()),
            model_name: "remote".into(),
            ..Default::default()
        };
        let embedder = build_embedder(&cfg).unwrap();
        assert_eq!(embedder.model_name(), "remote");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SemanticConfig {
            mode: "api".into(),
            ..Default::default()
        };
        assert!(matches!(
            build_embedder(&cfg),
            Err(SemanticError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn arc_embedder_forwards() {
        let stub = Arc::new(StubEmbedder::new(4));
        let direct = stub.vector_for("cat");
        let via_arc = Embedder::embed(&stub, "cat").await.unwrap();
        assert_eq!(via_arc.vector, direct);
    }
}
