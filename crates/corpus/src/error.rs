//! Error types produced by the corpus crate.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Read`](CorpusError::Read) | I/O | A corpus file is missing or unreadable |
//! | [`Parse`](CorpusError::Parse) | Data | A vector line holds something other than finite numbers |
//! | [`Alignment`](CorpusError::Alignment) | Data | Vector file and word file do not pair line for line |
//! | [`InvalidConfig`](CorpusError::InvalidConfig) | Config | The configured format is missing a required path |

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while loading or parsing a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The file could not be opened or read.
    #[error("failed to read corpus file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A record could not be parsed. `line` is 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// The vector and word sources disagree on line count or blank lines.
    #[error("vector and word files are misaligned: {0}")]
    Alignment(String),
    /// Configuration is inconsistent (e.g. paired format without a word file).
    #[error("invalid corpus config: {0}")]
    InvalidConfig(String),
}

impl CorpusError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CorpusError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        CorpusError::Parse {
            line,
            message: message.into(),
        }
    }
}
