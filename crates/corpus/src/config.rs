//! Configuration for locating and interpreting corpus files.
//!
//! Two on-disk layouts are supported:
//!
//! - [`CorpusFormat::Paired`] (default): `vectors_path` holds one comma-separated
//!   vector per line and `words_path` holds one word per line. Line N of one file
//!   belongs to line N of the other.
//! - [`CorpusFormat::Combined`]: a single file where every record is
//!   `word,v1,v2,...`.
//!
//! ```rust
//! use corpus::{CorpusConfig, CorpusFormat};
//!
//! let cfg = CorpusConfig::combined("vocab.csv");
//! assert_eq!(cfg.format, CorpusFormat::Combined);
//! cfg.validate().expect("combined config needs no word file");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// On-disk layout of the corpus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorpusFormat {
    /// Separate, index-aligned vector and word files.
    #[default]
    Paired,
    /// One file, label first on every line.
    Combined,
}

/// Where the corpus lives and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusConfig {
    /// File layout.
    #[serde(default)]
    pub format: CorpusFormat,
    /// Numeric vector file (paired) or the combined file.
    #[serde(default = "default_vectors_path")]
    pub vectors_path: PathBuf,
    /// Word labels, one per line. Required for [`CorpusFormat::Paired`].
    #[serde(default = "default_words_path")]
    pub words_path: Option<PathBuf>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            format: CorpusFormat::Paired,
            vectors_path: default_vectors_path(),
            words_path: default_words_path(),
        }
    }
}

impl CorpusConfig {
    /// Paired layout from two explicit paths.
    pub fn paired(vectors_path: impl Into<PathBuf>, words_path: impl Into<PathBuf>) -> Self {
        Self {
            format: CorpusFormat::Paired,
            vectors_path: vectors_path.into(),
            words_path: Some(words_path.into()),
        }
    }

    /// Combined `word,v1,v2,...` layout.
    pub fn combined(path: impl Into<PathBuf>) -> Self {
        Self {
            format: CorpusFormat::Combined,
            vectors_path: path.into(),
            words_path: None,
        }
    }

    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.vectors_path.as_os_str().is_empty() {
            return Err(CorpusError::InvalidConfig(
                "vectors_path must not be empty".into(),
            ));
        }
        if self.format == CorpusFormat::Paired {
            match self.words_path.as_deref() {
                Some(p) if !p.as_os_str().is_empty() => {}
                _ => {
                    return Err(CorpusError::InvalidConfig(
                        "paired format requires words_path".into(),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Every file this config reads, in load order.
    pub fn source_paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.vectors_path.as_path()];
        if self.format == CorpusFormat::Paired {
            if let Some(words) = self.words_path.as_deref() {
                paths.push(words);
            }
        }
        paths
    }
}

fn default_vectors_path() -> PathBuf {
    PathBuf::from("embeddings.txt")
}

fn default_words_path() -> Option<PathBuf> {
    Some(PathBuf::from("words.txt"))
}
