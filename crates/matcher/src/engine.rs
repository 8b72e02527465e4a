use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use corpus::{Corpus, CorpusEntry};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::metrics::metrics_recorder;
use crate::similarity::{cosine_with_norm, magnitude};
use crate::types::{MatchConfig, MatchError, SearchOutcome, SearchRequest, SimilarityHit};


/// Entries per rayon task when scanning in parallel.
const PARALLEL_CHUNK: usize = 4096;

/// Heap entry ordered so that the *worst* candidate is the maximum: lower
/// score first, then higher index. Popping from a `BinaryHeap` of these
/// evicts the entry that should lose.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Result of scanning a slice of entries.
#[derive(Default)]
struct Scan {
    heap: BinaryHeap<Candidate>,
    skipped: usize,
    scanned: usize,
    first_mismatch: Option<(usize, usize)>,
}

impl Scan {
    fn with_capacity(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k + 1),
            ..Default::default()
        }
    }

    #[inline]
    fn offer(&mut self, candidate: Candidate, k: usize) {
        if self.heap.len() < k {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            // `worst` is the max; a strictly smaller candidate ranks better.
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    fn merge(mut self, other: Scan, k: usize) -> Scan {
        self.skipped += other.skipped;
        self.scanned += other.scanned;
        self.first_mismatch = match (self.first_mismatch, other.first_mismatch) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        };
        for candidate in other.heap {
            self.offer(candidate, k);
        }
        self
    }
}

/// Query-side state shared by every entry comparison.
struct Probe<'a> {
    query: &'a [f64],
    query_norm: f64,
    exclude: Option<&'a str>,
    min_score: Option<f64>,
}

impl Probe<'_> {
    /// Score one entry; `None` when it is excluded or filtered out.
    #[inline]
    fn score(&self, entry: &CorpusEntry, scan: &mut Scan) -> Option<Candidate> {
        if entry.vector.len() != self.query.len() {
            scan.skipped += 1;
            if scan.first_mismatch.is_none() {
                scan.first_mismatch = Some((entry.index, entry.vector.len()));
            }
            return None;
        }
        if let Some(word) = self.exclude {
            if entry.word.eq_ignore_ascii_case(word) {
                return None;
            }
        }
        scan.scanned += 1;
        let score = cosine_with_norm(self.query, self.query_norm, &entry.vector);
        if self.min_score.is_some_and(|min| score < min) {
            return None;
        }
        Some(Candidate {
            score,
            index: entry.index,
        })
    }

    fn scan(&self, entries: &[CorpusEntry], k: usize) -> Scan {
        let mut scan = Scan::with_capacity(k.min(entries.len()));
        for entry in entries {
            if let Some(candidate) = self.score(entry, &mut scan) {
                scan.offer(candidate, k);
            }
        }
        scan
    }
}

/// Cosine top-K search over a corpus snapshot.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Rank `corpus` against `req.query` and keep the best `k`.
    ///
    /// Entries whose dimension differs from the query are skipped and counted
    /// in [`SearchOutcome::skipped`]; they never fail the search.
    pub fn search(
        &self,
        req: &SearchRequest<'_>,
        corpus: &Corpus,
    ) -> Result<SearchOutcome, MatchError> {
        if req.query.is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        // Never more hits than entries; also bounds the heap allocation.
        let k = req.top_k.unwrap_or(self.config.top_k).min(corpus.len());
        if k == 0 {
            return Ok(SearchOutcome::default());
        }

        let start = Instant::now();
        let probe = self.probe(req);
        let entries = corpus.entries();
        let parallel = entries.len() >= self.config.parallel_threshold;

        let scan = if parallel {
            entries
                .par_chunks(PARALLEL_CHUNK)
                .map(|chunk| probe.scan(chunk, k))
                .reduce(Scan::default, |a, b| a.merge(b, k))
        } else {
            probe.scan(entries, k)
        };

        if let Some((index, dimension)) = scan.first_mismatch {
            warn!(
                skipped = scan.skipped,
                query_dimension = req.query.len(),
                first_index = index,
                first_dimension = dimension,
                "search_skipped_mismatched_entries"
            );
        }

        let outcome = SearchOutcome {
            hits: resolve(scan.heap.into_sorted_vec(), corpus),
            skipped: scan.skipped,
            scanned: scan.scanned,
        };
        let latency = start.elapsed();
        debug!(
            corpus_size = entries.len(),
            k,
            hits = outcome.hits.len(),
            parallel,
            elapsed_micros = latency.as_micros() as u64,
            "search_complete"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_search(entries.len(), latency, outcome.hits.len(), outcome.skipped);
        }
        Ok(outcome)
    }

    /// Score every eligible entry and fully sort them (score descending, index
    /// ascending). Same filters as [`search`](Self::search), no top-K bound.
    pub fn rank_all(
        &self,
        req: &SearchRequest<'_>,
        corpus: &Corpus,
    ) -> Result<SearchOutcome, MatchError> {
        if req.query.is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        let probe = self.probe(req);
        let mut scan = Scan::default();
        let mut ranked: Vec<Candidate> = corpus
            .entries()
            .iter()
            .filter_map(|entry| probe.score(entry, &mut scan))
            .collect();
        // Entries are already in index order; a stable sort keeps it for ties.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(SearchOutcome {
            hits: resolve(ranked, corpus),
            skipped: scan.skipped,
            scanned: scan.scanned,
        })
    }

    fn probe<'a>(&self, req: &SearchRequest<'a>) -> Probe<'a> {
        Probe {
            query: req.query,
            query_norm: magnitude(req.query),
            exclude: req
                .query_word
                .filter(|_| self.config.exclude_query_word),
            min_score: self.config.min_score,
        }
    }
}

fn resolve(ranked: Vec<Candidate>, corpus: &Corpus) -> Vec<SimilarityHit> {
    ranked
        .into_iter()
        .filter_map(|c| {
            corpus.word(c.index).map(|word| SimilarityHit {
                index: c.index,
                word: word.to_string(),
                score: c.score,
            })
        })
        .collect()
}

/// Top-`k` hits for `query` with default settings.
pub fn search(query: &[f64], corpus: &Corpus, k: usize) -> Result<Vec<SimilarityHit>, MatchError> {
    Matcher::default()
        .search(&SearchRequest::new(query).with_top_k(k), corpus)
        .map(|outcome| outcome.hits)
}
