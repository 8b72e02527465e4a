use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use wordsim::{Corpus, CorpusFormat};

/// Corpus statistics
#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub entries: usize,
    pub dimension: Option<usize>,
    pub mismatched_entries: usize,
    pub format: CorpusFormat,
    pub sources: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl CorpusStats {
    fn new(corpus: &Corpus, format: CorpusFormat) -> Self {
        Self {
            entries: corpus.len(),
            dimension: corpus.dimension(),
            mismatched_entries: corpus.mismatched_entries(),
            format,
            sources: corpus
                .sources()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_at: corpus.loaded_at().into(),
        }
    }
}

/// `GET /api/v1/corpus`
pub async fn corpus_stats(State(state): State<Arc<ServerState>>) -> ServerResult<Json<CorpusStats>> {
    let corpus = state.service.load_corpus().await?;
    let format = state.service.corpus_cache().config().format;
    Ok(Json(CorpusStats::new(&corpus, format)))
}

/// `POST /api/v1/corpus/reload`
pub async fn reload_corpus(State(state): State<Arc<ServerState>>) -> ServerResult<Json<CorpusStats>> {
    let start = Instant::now();
    let corpus = state.service.reload_corpus().await?;
    tracing::info!(
        entries = corpus.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "corpus_reloaded"
    );
    let format = state.service.corpus_cache().config().format;
    Ok(Json(CorpusStats::new(&corpus, format)))
}
