//! YAML configuration for the suggestion pipeline.
//!
//! One file describes every stage: where the corpus lives, which embedder to
//! build, how to rank, and the per-stage time budgets.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "english vocabulary"
//!
//! corpus:
//!   format: paired
//!   vectors_path: "embeddings.txt"
//!   words_path: "words.txt"
//!
//! semantic:
//!   mode: "api"
//!   api_url: "https://api.openai.com/v1/embeddings"
//!   api_provider: "openai"
//!   model_name: "text-embedding-3-small"
//!   retry_config:
//!     max_retries: 2
//!     base_delay: 100
//!     max_delay: 2000
//!     backoff_multiplier: 2.0
//!     jitter: true
//!
//! search:
//!   top_k: 5
//!   exclude_query_word: true
//!
//! pipeline:
//!   embed_timeout_ms: 5000
//!   load_timeout_ms: 10000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use corpus::CorpusConfig;
use matcher::MatchConfig;
use semantic::SemanticConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Time budgets for the async stages of a suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound on one embedder call, retries included.
    #[serde(default = "PipelineConfig::default_embed_timeout_ms")]
    pub embed_timeout_ms: u64,
    /// Upper bound on reading and parsing the corpus files.
    #[serde(default = "PipelineConfig::default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl PipelineConfig {
    fn default_embed_timeout_ms() -> u64 {
        5_000
    }

    fn default_load_timeout_ms() -> u64 {
        10_000
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embed_timeout_ms: Self::default_embed_timeout_ms(),
            load_timeout_ms: Self::default_load_timeout_ms(),
        }
    }
}

/// Top-level YAML configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordsimConfig {
    /// Configuration format version
    #[serde(default = "WordsimConfig::default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub semantic: SemanticConfig,

    #[serde(default)]
    pub search: MatchConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl WordsimConfig {
    fn default_version() -> String {
        "1.0".into()
    }

    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: WordsimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WORDSIM_EMBED_API_*` environment overrides to the semantic section.
    pub fn with_env_overrides(mut self) -> Self {
        self.semantic = self.semantic.with_env_overrides();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        self.corpus
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("corpus: {e}")))?;
        self.semantic
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("semantic: {e}")))?;
        self.search
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("search: {e}")))?;

        if self.pipeline.embed_timeout_ms == 0 || self.pipeline.load_timeout_ms == 0 {
            return Err(ConfigLoadError::Validation(
                "pipeline timeouts must be greater than zero".into(),
            ));
        }

        // A single API attempt must be able to finish inside the embed deadline.
        if self.semantic.mode == "api"
            && self.semantic.api_timeout_secs.saturating_mul(1000) >= self.pipeline.embed_timeout_ms
        {
            return Err(ConfigLoadError::Validation(format!(
                "pipeline: embed_timeout_ms ({}) must exceed semantic.api_timeout_secs ({}s)",
                self.pipeline.embed_timeout_ms, self.semantic.api_timeout_secs
            )));
        }
        Ok(())
    }
}

impl Default for WordsimConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            name: None,
            corpus: CorpusConfig::default(),
            semantic: SemanticConfig::default(),
            search: MatchConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus::CorpusFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
corpus:
  vectors_path: "data/vectors.txt"
  words_path: "data/words.txt"
semantic:
  mode: "stub"
  stub_dimension: 3
search:
  top_k: 3
pipeline:
  embed_timeout_ms: 250
"#;

        let config = WordsimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("test config"));
        assert_eq!(config.corpus.vectors_path, PathBuf::from("data/vectors.txt"));
        assert_eq!(config.semantic.stub_dimension, 3);
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.pipeline.embed_timeout_ms, 250);
        assert_eq!(config.pipeline.load_timeout_ms, 10_000);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = WordsimConfig::from_yaml("{}").unwrap();
        assert_eq!(config, WordsimConfig::default());
    }

    #[test]
    fn combined_corpus_section() {
        let yaml = r#"
corpus:
  format: combined
  vectors_path: "vocab.csv"
"#;
        let config = WordsimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.corpus.format, CorpusFormat::Combined);
    }

    #[test]
    fn load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"version: \"1\"\nsearch:\n  top_k: 8\n")
            .unwrap();

        let config = WordsimConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.search.top_k, 8);
    }

    #[test]
    fn unsupported_version() {
        let err = WordsimConfig::from_yaml("version: \"2.0\"").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn invalid_stage_configs_are_reported_by_section() {
        let err = WordsimConfig::from_yaml("semantic:\n  mode: api\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(ref m) if m.starts_with("semantic:")));

        let err = WordsimConfig::from_yaml("search:\n  min_score: 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(ref m) if m.starts_with("search:")));

        let err = WordsimConfig::from_yaml("pipeline:\n  load_timeout_ms: 0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn api_timeout_must_fit_inside_embed_deadline() {
        let yaml = r#"
semantic:
  mode: api
  api_url: "http://localhost:9000/embed"
  api_timeout_secs: 30
pipeline:
  embed_timeout_ms: 5000
"#;
        let err = WordsimConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(ref m) if m.contains("embed_timeout_ms")));

        let fits = yaml.replace("api_timeout_secs: 30", "api_timeout_secs: 4");
        let config = WordsimConfig::from_yaml(&fits).unwrap();
        assert_eq!(config.semantic.api_timeout_secs, 4);
    }

    #[test]
    fn default_api_timeout_fits_default_embed_deadline() {
        let mut config = WordsimConfig::default();
        config.semantic.mode = "api".into();
        config.semantic.api_url = Some("http://localhost:9000/embed".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_yaml() {
        let err = WordsimConfig::from_yaml("search: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigLoadError::YamlParse(_)));
    }

    #[test]
    fn missing_file() {
        let err = WordsimConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }
}
