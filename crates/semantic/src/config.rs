use serde::{Deserialize, Serialize};

use crate::error::SemanticError;
use crate::retry::RetryConfig;

/// Environment variable that overrides [`SemanticConfig::api_url`].
pub const API_URL_ENV: &str = "WORDSIM_EMBED_API_URL";
/// Environment variable holding a bearer token for the embedding provider.
pub const API_TOKEN_ENV: &str = "WORDSIM_EMBED_API_TOKEN";

/// Runtime configuration describing which embedder to build and how to post-process vectors.
///
/// # Example
/// ```no_run
/// use semantic::{build_embedder, SemanticConfig};
///
/// let cfg = SemanticConfig {
///     mode: "api".into(),
///     api_url: Some("https://api.openai.com/v1/embeddings".into()),
///     api_auth_header: Some("Bearer sk-xxx".into()),
///     api_provider: Some("openai".into()),
///     model_name: "text-embedding-3-small".into(),
///     ..Default::default()
/// };
///
/// let embedder = build_embedder(&cfg).expect("valid config");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Embedder selector: `"stub"` (deterministic, offline) or `"api"` (remote HTTP).
    pub mode: String,
    /// Friendly label surfaced on every `SemanticEmbedding`; also sent as the
    /// `model` field to OpenAI-style providers.
    pub model_name: String,
    /// API inference endpoint when [`mode`](Self::mode) is `"api"`.
    pub api_url: Option<String>,
    /// Authorization header (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Remote provider hint: `"hf"`, `"openai"`, or `"custom"` (default).
    pub api_provider: Option<String>,
    /// Per-request HTTP timeout in seconds.
    pub api_timeout_secs: u64,
    /// Vector length produced by the stub embedder. Must match the corpus.
    pub stub_dimension: usize,
    /// Normalize the resulting vector to unit length. Cosine scores are unaffected.
    pub normalize: bool,
    /// Retry policy for API calls. `None` uses [`RetryConfig::default`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryConfig>,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            mode: "stub".into(),
            model_name: "universal-sentence-encoder".into(),
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            api_timeout_secs: 2,
            stub_dimension: 512,
            normalize: false,
            retry_config: None,
        }
    }
}

impl SemanticConfig {
    /// Apply `WORDSIM_EMBED_API_URL` / `WORDSIM_EMBED_API_TOKEN` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(token) = lookup(API_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_auth_header = Some(format!("Bearer {}", token.trim()));
        }
        self
    }

    pub fn validate(&self) -> Result<(), SemanticError> {
        match self.mode.as_str() {
            "stub" => {
                if self.stub_dimension == 0 {
                    return Err(SemanticError::InvalidConfig(
                        "stub_dimension must be greater than zero".into(),
                    ));
                }
            }
            "api" => {
                let url = self.api_url.as_deref().unwrap_or_default();
                if url.trim().is_empty() {
                    return Err(SemanticError::InvalidConfig(
                        "api_url is required for api mode".into(),
                    ));
                }
                if self.api_timeout_secs == 0 {
                    return Err(SemanticError::InvalidConfig(
                        "api_timeout_secs must be greater than zero".into(),
                    ));
                }
            }
            other => {
                return Err(SemanticError::InvalidConfig(format!(
                    "unknown embedder mode `{other}` (expected `stub` or `api`)"
                )))
            }
        }
        Ok(())
    }

    pub(crate) fn retry(&self) -> RetryConfig {
        self.retry_config.unwrap_or_default()
    }
}
