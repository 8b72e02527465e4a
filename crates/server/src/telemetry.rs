//! Prometheus export for search and request metrics.

use matcher::{set_match_metrics, MatchMetrics};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Forwards matcher observations to the `metrics` facade.
#[derive(Debug, Default)]
pub struct PrometheusMatchMetrics;

impl MatchMetrics for PrometheusMatchMetrics {
    fn record_search(&self, corpus_size: usize, latency: Duration, hit_count: usize, skipped: usize) {
        metrics::counter!("wordsim_searches_total").increment(1);
        metrics::histogram!("wordsim_search_latency_seconds").record(latency.as_secs_f64());
        metrics::histogram!("wordsim_search_hits").record(hit_count as f64);
        metrics::gauge!("wordsim_corpus_entries").set(corpus_size as f64);
        if skipped > 0 {
            metrics::counter!("wordsim_skipped_entries_total").increment(skipped as u64);
        }
    }
}

/// Install the process-wide Prometheus recorder and the matcher hook.
///
/// Idempotent: later calls return the handle from the first install.
pub fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PROMETHEUS.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        set_match_metrics(Some(Arc::new(PrometheusMatchMetrics)));
        Ok::<_, anyhow::Error>(handle)
    })?;
    Ok(handle.clone())
}
