use async_trait::async_trait;
use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::{Embedder, SemanticConfig, SemanticEmbedding, SemanticError};

/// Deterministic offline embedder.
///
/// Generates sinusoid values seeded by a hash of the input text, so the same
/// text always maps to the same vector. Useful for tests and for running the
/// service without a model provider; the vectors carry no semantic meaning.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dimension: usize,
    model_name: String,
    normalize: bool,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            model_name: "stub".into(),
            normalize: false,
        }
    }

    pub fn from_config(cfg: &SemanticConfig) -> Self {
        Self {
            dimension: cfg.stub_dimension,
            model_name: format!("stub:{}", cfg.model_name),
            normalize: cfg.normalize,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Synchronous form of [`Embedder::embed`].
    pub fn vector_for(&self, text: &str) -> Vec<f64> {
        let h = hash64(text.as_bytes());
        let mut v: Vec<f64> = (0..self.dimension)
            .map(|idx| {
                let phase = (h >> (idx % 32)) as f64 * 1e-4 + idx as f64;
                phase.sin()
            })
            .collect();
        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        v
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError> {
        if text.trim().is_empty() {
            return Err(SemanticError::EmptyInput);
        }
        Ok(SemanticEmbedding::new(
            text,
            self.vector_for(text),
            &self.model_name,
            self.normalize,
        ))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
