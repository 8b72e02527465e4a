// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`];
// every `Matcher::search` then reports latency, hit count and skipped entries.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for search operations.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one search.
    ///
    /// `corpus_size` is the number of entries in the snapshot, `hit_count` the
    /// number of hits returned after filtering, and `skipped` the entries
    /// ignored for a dimension mismatch.
    fn record_search(
        &self,
        corpus_size: usize,
        latency: Duration,
        hit_count: usize,
        skipped: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global search metrics recorder.
///
/// Typically called once during service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
