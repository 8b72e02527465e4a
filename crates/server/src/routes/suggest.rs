//! Suggestion lookups.
//!
//! Both routes run the same pipeline; `/{phrase}` takes the text from the
//! path and `/api/v1/suggest` from `?q=`. Scores leave the pipeline as raw
//! cosine values and are formatted here.

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wordsim::{SimilarityHit, Suggestions};

/// Largest `k` a caller may ask for.
pub const MAX_K: usize = 1_000;

/// Query-string options shared by both suggestion routes.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    /// Text to look up (`/api/v1/suggest` only)
    #[serde(default)]
    pub q: Option<String>,

    /// Number of suggestions, overriding the configured top-K
    #[serde(default)]
    pub k: Option<usize>,

    /// `scored` (default) or `words`
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Scored,
    Words,
}

impl OutputFormat {
    fn parse(raw: Option<&str>) -> ServerResult<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("scored") => Ok(OutputFormat::Scored),
            Some("words") => Ok(OutputFormat::Words),
            Some(other) => Err(ServerError::BadRequest(format!(
                "unknown format `{other}`, expected `scored` or `words`"
            ))),
        }
    }
}

/// One ranked word with its similarity.
#[derive(Debug, Serialize)]
pub struct ScoredSuggestion {
    pub word: String,
    /// Raw cosine similarity
    pub score: f64,
    /// `score * 100`, rounded to two decimals
    pub percent: f64,
}

impl From<SimilarityHit> for ScoredSuggestion {
    fn from(hit: SimilarityHit) -> Self {
        Self {
            percent: as_percent(hit.score),
            word: hit.word,
            score: hit.score,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuggestionList {
    Scored(Vec<ScoredSuggestion>),
    Words(Vec<String>),
}

/// Suggestion response
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// The phrase that was looked up; `null` for blank input
    #[serde(rename = "missingWord")]
    pub missing_word: Option<String>,
    pub suggestions: SuggestionList,
}

impl SuggestResponse {
    fn new(suggestions: Suggestions, format: OutputFormat) -> Self {
        let missing_word = suggestions.lookup().map(str::to_string);
        let hits = suggestions.hits;
        let suggestions = match format {
            OutputFormat::Scored => {
                SuggestionList::Scored(hits.into_iter().map(ScoredSuggestion::from).collect())
            }
            OutputFormat::Words => SuggestionList::Words(hits.into_iter().map(|h| h.word).collect()),
        };
        Self {
            missing_word,
            suggestions,
        }
    }
}

pub fn as_percent(score: f64) -> f64 {
    (score * 10_000.0).round() / 100.0
}

fn validate_k(k: Option<usize>) -> ServerResult<Option<usize>> {
    match k {
        Some(k) if k == 0 || k > MAX_K => Err(ServerError::BadRequest(format!(
            "k must be between 1 and {MAX_K}, got {k}"
        ))),
        k => Ok(k),
    }
}

async fn run(state: &ServerState, text: &str, params: &SuggestParams) -> ServerResult<SuggestResponse> {
    let format = OutputFormat::parse(params.format.as_deref())?;
    let k = validate_k(params.k)?;
    let suggestions = state.service.suggest(text, k).await?;
    if suggestions.embedding_error.is_some() {
        metrics::counter!("wordsim_embedding_failures_total").increment(1);
    }
    Ok(SuggestResponse::new(suggestions, format))
}

/// `GET /{phrase}`
pub async fn suggest_phrase(
    State(state): State<Arc<ServerState>>,
    Path(phrase): Path<String>,
    Query(params): Query<SuggestParams>,
) -> ServerResult<Json<SuggestResponse>> {
    run(&state, &phrase, &params).await.map(Json)
}

/// `GET /api/v1/suggest?q=..&k=..&format=..`
pub async fn suggest_query(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SuggestParams>,
) -> ServerResult<Json<SuggestResponse>> {
    let text = params.q.clone().unwrap_or_default();
    run(&state, &text, &params).await.map(Json)
}
