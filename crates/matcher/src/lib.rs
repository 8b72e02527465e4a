//! # Similarity Search Engine (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` answers "which corpus words are closest to this vector?". Given a
//! query embedding and an immutable [`corpus::Corpus`] snapshot it scores every
//! entry with cosine similarity and returns the best `k`, best first.
//!
//! ## Ranking rules
//!
//! - Score is the raw cosine in [-1, 1]; a zero-magnitude vector scores 0.
//! - Ordering is score descending, then corpus index ascending, so equal
//!   scores always come back in the same order.
//! - Top-K uses a bounded min-heap (O(n log k)). [`Matcher::rank_all`] is the
//!   full stable sort and yields the same prefix.
//! - Entries whose dimension differs from the query are skipped and counted,
//!   never fatal.
//! - Large corpora (see [`MatchConfig::parallel_threshold`]) are scanned in
//!   parallel chunks with `rayon`; the result is identical.
//!
//! ## Example Usage
//!
//! ```
//! use corpus::Corpus;
//! use matcher::{MatchConfig, Matcher, SearchRequest};
//!
//! let corpus = Corpus::from_pairs(vec![
//!     ("cat", vec![1.0, 0.0]),
//!     ("dog", vec![0.9, 0.1]),
//!     ("car", vec![0.0, 1.0]),
//! ]);
//! let matcher = Matcher::new(MatchConfig::default().with_top_k(2)).unwrap();
//! let outcome = matcher
//!     .search(&SearchRequest::new(&[1.0, 0.0]), &corpus)
//!     .unwrap();
//!
//! let words: Vec<_> = outcome.hits.iter().map(|h| h.word.as_str()).collect();
//! assert_eq!(words, ["cat", "dog"]);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-search latency, hit counts and skipped entries. This is typically done
//! once during service startup.

pub mod engine;
pub mod metrics;
pub mod similarity;
pub mod types;

pub use crate::engine::{search, Matcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::similarity::cosine_similarity;
pub use crate::types::{MatchConfig, MatchError, SearchOutcome, SearchRequest, SimilarityHit};
