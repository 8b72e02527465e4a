//! Workspace umbrella crate for wordsim.
//!
//! Stitches the stages together behind one async entry point,
//! [`SuggestionService::suggest`]: raw text in, ranked similar words out.
//!
//! ```text
//! raw text -> parse_query -> Embedder::embed -> CorpusCache::get -> Matcher::search
//! ```
//!
//! The embedder and the corpus cache are built once and shared; each request
//! only embeds its own lookup phrase and searches the current corpus snapshot.

pub mod config;
pub mod query;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

pub use corpus::{Corpus, CorpusCache, CorpusConfig, CorpusError, CorpusFormat};
pub use matcher::{MatchConfig, MatchError, Matcher, SearchRequest, SimilarityHit};
pub use semantic::{Embedder, SemanticConfig, SemanticEmbedding, SemanticError, StubEmbedder};

pub use crate::config::{ConfigLoadError, PipelineConfig, WordsimConfig};
pub use crate::query::{ParsedQuery, parse_query};

/// The async stage that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Embedding,
    CorpusLoad,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Embedding => f.write_str("embedding"),
            Stage::CorpusLoad => f.write_str("corpus load"),
        }
    }
}

/// Errors that can occur while producing suggestions.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("corpus unavailable: {0}")]
    Corpus(#[from] CorpusError),
    #[error("embedding failed: {0}")]
    Embedding(#[from] SemanticError),
    #[error("search failed: {0}")]
    Match(#[from] MatchError),
    #[error("{stage} timed out after {timeout_ms} ms")]
    Timeout { stage: Stage, timeout_ms: u64 },
    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl PipelineError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::Timeout { .. } => true,
            PipelineError::Embedding(err) => err.is_transient(),
            _ => false,
        }
    }
}

/// Ranked suggestions for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub query: ParsedQuery,
    /// Best first.
    pub hits: Vec<SimilarityHit>,
    /// Corpus entries ignored for a dimension mismatch.
    pub skipped: usize,
    /// Set when the embedder failed or returned an empty vector, and the
    /// request degraded to no hits.
    pub embedding_error: Option<String>,
}

impl Suggestions {
    /// The phrase that was looked up, if any.
    pub fn lookup(&self) -> Option<&str> {
        self.query.lookup()
    }
}

/// End-to-end suggestion pipeline.
pub struct SuggestionService {
    embedder: Arc<dyn Embedder>,
    corpus: Arc<CorpusCache>,
    matcher: Matcher,
    pipeline: PipelineConfig,
}

impl SuggestionService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        corpus: Arc<CorpusCache>,
        matcher: Matcher,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            embedder,
            corpus,
            matcher,
            pipeline,
        }
    }

    /// Build every stage from one config. Does not touch the corpus files.
    pub fn from_config(cfg: &WordsimConfig) -> Result<Self, PipelineError> {
        let embedder = semantic::build_embedder(&cfg.semantic)?;
        cfg.corpus.validate()?;
        let matcher = Matcher::new(cfg.search.clone())?;
        Ok(Self::new(
            embedder,
            Arc::new(CorpusCache::new(cfg.corpus.clone())),
            matcher,
            cfg.pipeline,
        ))
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn corpus_cache(&self) -> &Arc<CorpusCache> {
        &self.corpus
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn pipeline_config(&self) -> &PipelineConfig {
        &self.pipeline
    }

    /// Current corpus snapshot, re-read from disk if the files changed.
    pub async fn load_corpus(&self) -> Result<Arc<Corpus>, PipelineError> {
        let cache = Arc::clone(&self.corpus);
        self.blocking_load(move || cache.get()).await
    }

    /// Force a re-read of the corpus files.
    pub async fn reload_corpus(&self) -> Result<Arc<Corpus>, PipelineError> {
        let cache = Arc::clone(&self.corpus);
        self.blocking_load(move || cache.refresh()).await
    }

    /// Suggest up to `k` (or the configured `top_k`) words similar to the
    /// lookup phrase in `raw`.
    ///
    /// Blank input returns empty suggestions without embedding or reading the
    /// corpus. An embedder failure is logged and also yields empty suggestions,
    /// with [`Suggestions::embedding_error`] set; corpus failures and timeouts
    /// are errors.
    pub async fn suggest(&self, raw: &str, k: Option<usize>) -> Result<Suggestions, PipelineError> {
        let query = parse_query(raw);
        let Some(lookup) = query.lookup().map(str::to_owned) else {
            return Ok(Suggestions {
                query,
                ..Default::default()
            });
        };

        let start = Instant::now();
        let corpus = self.load_corpus().await?;

        let embedded = with_deadline(
            Stage::Embedding,
            self.pipeline.embed_timeout(),
            self.embedder.embed(&lookup),
        )
        .await?
        .and_then(|embedding| {
            if embedding.vector.is_empty() {
                Err(SemanticError::Inference("embedder returned an empty vector".into()))
            } else {
                Ok(embedding)
            }
        });
        let embedding = match embedded {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!(
                    lookup = %lookup,
                    model = self.embedder.model_name(),
                    error = %err,
                    "embedding_failed"
                );
                return Ok(Suggestions {
                    query,
                    embedding_error: Some(err.to_string()),
                    ..Default::default()
                });
            }
        };

        let mut request = SearchRequest::new(&embedding.vector).with_query_word(&lookup);
        if let Some(k) = k {
            request = request.with_top_k(k);
        }
        let outcome = self.matcher.search(&request, &corpus)?;

        info!(
            lookup = %lookup,
            hits = outcome.hits.len(),
            skipped = outcome.skipped,
            corpus_size = corpus.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "suggest_complete"
        );
        Ok(Suggestions {
            query,
            hits: outcome.hits,
            skipped: outcome.skipped,
            embedding_error: None,
        })
    }

    async fn blocking_load<F>(&self, load: F) -> Result<Arc<Corpus>, PipelineError>
    where
        F: FnOnce() -> Result<Arc<Corpus>, CorpusError> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(load);
        with_deadline(Stage::CorpusLoad, self.pipeline.load_timeout(), task)
            .await?
            .map_err(|e| PipelineError::Task(e.to_string()))?
            .map_err(PipelineError::from)
    }
}

async fn with_deadline<T>(
    stage: Stage,
    limit: Duration,
    fut: impl Future<Output = T>,
) -> Result<T, PipelineError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| PipelineError::Timeout {
            stage,
            timeout_ms: limit.as_millis() as u64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedEmbedder(Vec<f64>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError> {
            Ok(SemanticEmbedding {
                text: text.to_string(),
                vector: self.0.clone(),
                model_name: "fixed".into(),
                embedding_dim: self.0.len(),
                normalized: false,
            })
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn service_without_files(embedder: Arc<dyn Embedder>) -> SuggestionService {
        let cache = CorpusCache::new(CorpusConfig::paired(
            "/nonexistent/vectors.txt",
            "/nonexistent/words.txt",
        ));
        SuggestionService::new(
            embedder,
            Arc::new(cache),
            Matcher::default(),
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn blank_input_short_circuits_before_io() {
        // The corpus path does not exist; any read would fail.
        let service = service_without_files(Arc::new(FixedEmbedder(vec![1.0, 0.0])));
        let suggestions = service.suggest("   ", None).await.unwrap();
        assert!(suggestions.hits.is_empty());
        assert_eq!(suggestions.lookup(), None);
        assert!(service.corpus_cache().snapshot().is_none());
    }

    #[tokio::test]
    async fn missing_corpus_is_an_error() {
        let service = service_without_files(Arc::new(FixedEmbedder(vec![1.0, 0.0])));
        let err = service.suggest("cat", None).await.unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(CorpusError::Read { .. })));
        assert!(!err.is_retryable());
    }

    #[test]
    fn timeout_is_retryable() {
        let err = PipelineError::Timeout {
            stage: Stage::Embedding,
            timeout_ms: 10,
        };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "embedding timed out after 10 ms");
    }

    #[test]
    fn from_config_rejects_invalid_semantic_section() {
        let cfg = WordsimConfig {
            semantic: SemanticConfig {
                mode: "api".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SuggestionService::from_config(&cfg),
            Err(PipelineError::Embedding(SemanticError::InvalidConfig(_)))
        ));
    }
}
