use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::normalize::l2_normalize_in_place;
use crate::retry::{execute_with_retry_async, RetryConfig};
use crate::{Embedder, SemanticConfig, SemanticEmbedding, SemanticError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiProviderKind {
    HuggingFace,
    OpenAI,
    Custom,
}

impl ApiProviderKind {
    fn from_config(cfg: &SemanticConfig) -> Self {
        let provider = cfg
            .api_provider
            .as_deref()
            .unwrap_or("custom")
            .to_ascii_lowercase();
        match provider.as_str() {
            "hf" | "huggingface" => ApiProviderKind::HuggingFace,
            "openai" | "gpt" => ApiProviderKind::OpenAI,
            _ => ApiProviderKind::Custom,
        }
    }
}

/// Embedder backed by a remote HTTP inference endpoint.
///
/// One pooled `reqwest::Client` is built at construction and reused for every
/// call. Transient failures are retried per [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct ApiEmbedder {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
    provider: ApiProviderKind,
    model_name: String,
    normalize: bool,
    retry: RetryConfig,
}

impl ApiEmbedder {
    pub fn new(cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        let url = cfg
            .api_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| SemanticError::InvalidConfig("api_url is required for api mode".into()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.api_timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| SemanticError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            auth_header: cfg.api_auth_header.clone(),
            provider: ApiProviderKind::from_config(cfg),
            model_name: cfg.model_name.clone(),
            normalize: cfg.normalize,
            retry: cfg.retry(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, payload: &Value) -> Result<Value, SemanticError> {
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header(reqwest::header::AUTHORIZATION, header);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    SemanticError::InvalidConfig(format!("cannot build request: {e}"))
                } else {
                    SemanticError::Request(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SemanticError::Inference(format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError> {
        if text.trim().is_empty() {
            return Err(SemanticError::EmptyInput);
        }
        let payload = build_api_payload(self.provider, text, &self.model_name);

        let outcome = execute_with_retry_async(&self.retry, |_| self.send(&payload)).await;
        debug!(
            attempts = outcome.attempts,
            elapsed_ms = outcome.total_duration.as_millis() as u64,
            "embedding_request"
        );
        let response = outcome.into_result()?;

        let mut vector = parse_embeddings_from_value(response)?
            .into_iter()
            .next()
            .ok_or_else(|| SemanticError::Inference("API response did not contain embeddings".into()))?;
        if vector.is_empty() {
            return Err(SemanticError::Inference("API returned an empty embedding".into()));
        }
        if self.normalize {
            l2_normalize_in_place(&mut vector);
        }
        Ok(SemanticEmbedding::new(
            text,
            vector,
            &self.model_name,
            self.normalize,
        ))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn build_api_payload(provider: ApiProviderKind, text: &str, model_name: &str) -> Value {
    match provider {
        ApiProviderKind::HuggingFace => json!({ "inputs": text }),
        ApiProviderKind::OpenAI => json!({ "input": text, "model": model_name }),
        ApiProviderKind::Custom => json!({ "text": text }),
    }
}

/// Accepts `{"embeddings": ...}`, OpenAI's `{"data": [{"embedding": [...]}]}`,
/// a bare vector, or an array of vectors.
fn parse_embeddings_from_value(value: Value) -> Result<Vec<Vec<f64>>, SemanticError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_embedding_collection(embeddings);
            }
            if let Some(embedding) = map.remove("embedding") {
                return parse_embedding_vector(embedding).map(|v| vec![v]);
            }

            if let Some(Value::Array(items)) = map.remove("data") {
                return items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(mut obj) => obj
                            .remove("embedding")
                            .ok_or_else(|| {
                                SemanticError::Inference(
                                    "missing `embedding` field in data item".into(),
                                )
                            })
                            .and_then(parse_embedding_vector),
                        _ => Err(SemanticError::Inference(
                            "unexpected entry inside `data` array".into(),
                        )),
                    })
                    .collect();
            }

            Err(SemanticError::Inference(
                "unsupported API response shape".into(),
            ))
        }
        other => parse_embedding_collection(other),
    }
}

fn parse_embedding_collection(value: Value) -> Result<Vec<Vec<f64>>, SemanticError> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Vec::new())
            } else if items.iter().all(|item| matches!(item, Value::Array(_))) {
                items.into_iter().map(parse_embedding_vector).collect()
            } else {
                parse_embedding_vector(Value::Array(items)).map(|vec| vec![vec])
            }
        }
        other => parse_embedding_vector(other).map(|vec| vec![vec]),
    }
}

fn parse_embedding_vector(value: Value) -> Result<Vec<f64>, SemanticError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| SemanticError::Inference("non-finite embedding value".into())),
                other => Err(SemanticError::Inference(format!(
                    "embedding entries must be numbers, got {other}"
                ))),
            })
            .collect(),
        other => Err(SemanticError::Inference(format!(
            "embedding vector must be an array, got {other}"
        ))),
    }
}
