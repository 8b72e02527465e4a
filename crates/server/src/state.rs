use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use wordsim::{SuggestionService, WordsimConfig};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Suggestion pipeline (shared across requests)
    pub service: Arc<SuggestionService>,

    /// Prometheus render handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,

    pub started_at: Instant,
}

impl ServerState {
    /// Build the pipeline from `config.pipeline_config`, or from defaults.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let pipeline = match &config.pipeline_config {
            Some(path) => WordsimConfig::from_file(path)?,
            None => WordsimConfig::default(),
        }
        .with_env_overrides();
        let service = SuggestionService::from_config(&pipeline)?;
        Ok(Self::with_service(config, service))
    }

    pub fn with_service(config: ServerConfig, service: SuggestionService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
            metrics: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
