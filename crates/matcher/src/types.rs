use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search tuning knobs.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded in
/// the pipeline's YAML config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Number of hits returned when the request does not override it.
    #[serde(default = "MatchConfig::default_top_k")]
    pub top_k: usize,
    /// Hits scoring below this threshold are dropped.
    #[serde(default)]
    pub min_score: Option<f64>,
    /// Drop the corpus entry whose word equals the query phrase.
    #[serde(default = "MatchConfig::default_exclude_query_word")]
    pub exclude_query_word: bool,
    /// Corpora with at least this many entries are scanned in parallel.
    #[serde(default = "MatchConfig::default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl MatchConfig {
    pub(crate) fn default_top_k() -> usize {
        5
    }

    pub(crate) fn default_exclude_query_word() -> bool {
        true
    }

    pub(crate) fn default_parallel_threshold() -> usize {
        20_000
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if let Some(min) = self.min_score {
            if !(-1.0..=1.0).contains(&min) {
                return Err(MatchError::InvalidConfig(
                    "min_score must be between -1.0 and 1.0".into(),
                ));
            }
        }
        if self.parallel_threshold == 0 {
            return Err(MatchError::InvalidConfig(
                "parallel_threshold must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: Self::default_top_k(),
            min_score: None,
            exclude_query_word: Self::default_exclude_query_word(),
            parallel_threshold: Self::default_parallel_threshold(),
        }
    }
}

/// A single search against a corpus snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    /// Query embedding.
    pub query: &'a [f64],
    /// The phrase that produced `query`, used by `exclude_query_word`.
    pub query_word: Option<&'a str>,
    /// Overrides [`MatchConfig::top_k`].
    pub top_k: Option<usize>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a [f64]) -> Self {
        Self {
            query,
            query_word: None,
            top_k: None,
        }
    }

    pub fn with_query_word(mut self, word: &'a str) -> Self {
        self.query_word = Some(word);
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }
}

/// One ranked corpus entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityHit {
    /// Corpus index of the matched entry.
    pub index: usize,
    /// Word resolved from `index`.
    pub word: String,
    /// Raw cosine similarity in [-1, 1].
    pub score: f64,
}

/// Ranked hits plus scan bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Best first; ties broken by ascending index.
    pub hits: Vec<SimilarityHit>,
    /// Entries skipped because their dimension differs from the query.
    pub skipped: usize,
    /// Entries actually scored.
    pub scanned: usize,
}

/// Errors produced by the matching layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("query embedding is empty")]
    EmptyQuery,
    /// Two vectors of different length were compared.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.top_k, 5);
        assert!(cfg.exclude_query_word);
        assert!(cfg.min_score.is_none());
    }

    #[test]
    fn out_of_range_min_score_rejected() {
        let cfg = MatchConfig {
            min_score: Some(1.5),
            ..MatchConfig::default()
        };
        match cfg.validate().expect_err("config should be invalid") {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("min_score")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_parallel_threshold_rejected() {
        let cfg = MatchConfig {
            parallel_threshold: 0,
            ..MatchConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"top_k": 10}"#).unwrap();
        assert_eq!(cfg.top_k, 10);
        assert!(cfg.exclude_query_word);
        assert_eq!(cfg.parallel_threshold, MatchConfig::default_parallel_threshold());
    }

    #[test]
    fn request_builder() {
        let q = [1.0, 0.0];
        let req = SearchRequest::new(&q).with_query_word("cat").with_top_k(3);
        assert_eq!(req.query_word, Some("cat"));
        assert_eq!(req.top_k, Some(3));
    }

    #[test]
    fn error_messages() {
        let err = MatchError::DimensionMismatch {
            expected: 512,
            actual: 300,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 512, got 300");
        assert_eq!(MatchError::EmptyQuery.to_string(), "query embedding is empty");
    }
}
