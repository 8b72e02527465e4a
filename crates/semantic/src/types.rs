use serde::{Deserialize, Serialize};

/// Embedding output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticEmbedding {
    /// Text that was embedded.
    pub text: String,
    /// Final embedding values (model output or deterministic stub).
    pub vector: Vec<f64>,
    /// Name of the model used to produce the vector.
    pub model_name: String,
    /// Dimension of `vector`.
    pub embedding_dim: usize,
    /// Whether [`vector`](Self::vector) was L2-normalized.
    pub normalized: bool,
}

impl SemanticEmbedding {
    pub(crate) fn new(text: &str, vector: Vec<f64>, model_name: &str, normalized: bool) -> Self {
        Self {
            text: text.to_string(),
            embedding_dim: vector.len(),
            vector,
            model_name: model_name.to_string(),
            normalized,
        }
    }
}
