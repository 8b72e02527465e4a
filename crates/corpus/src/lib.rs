//! Embedding Corpus Loader
//!
//! Reads the reference vocabulary that queries are matched against: a file of
//! comma-separated vectors and a file of words, joined line for line. The join
//! is load-bearing (line N of one file labels line N of the other), so the
//! loader validates it and fails with [`CorpusError::Alignment`] instead of
//! silently shifting labels.
//!
//! ## What lives here
//!
//! - [`parse_vectors`], [`parse_words`], [`parse_combined`], [`pair_records`]:
//!   pure parsers, easy to test without touching disk.
//! - [`load_corpus`]: reads the configured files into an immutable [`Corpus`].
//! - [`CorpusCache`]: keeps one parsed snapshot per process and reloads it when
//!   the files change on disk.
//!
//! ## Example
//!
//! ```no_run
//! use corpus::{CorpusCache, CorpusConfig};
//!
//! let cache = CorpusCache::new(CorpusConfig::paired("embeddings.txt", "words.txt"));
//! let corpus = cache.get().expect("corpus loads");
//! println!("{} words, dim {:?}", corpus.len(), corpus.dimension());
//! ```

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

mod cache;
mod config;
mod error;
mod parse;
mod types;

pub use crate::cache::CorpusCache;
pub use crate::config::{CorpusConfig, CorpusFormat};
pub use crate::error::CorpusError;
pub use crate::parse::{pair_records, parse_combined, parse_vector_line, parse_vectors, parse_words};
pub use crate::types::{Corpus, CorpusEntry};

/// Read and parse the corpus described by `cfg`.
pub fn load_corpus(cfg: &CorpusConfig) -> Result<Corpus, CorpusError> {
    cfg.validate()?;
    let start = Instant::now();

    let entries = match cfg.format {
        CorpusFormat::Paired => {
            let words_path = cfg.words_path.as_deref().ok_or_else(|| {
                CorpusError::InvalidConfig("paired format requires words_path".into())
            })?;
            let vectors = parse_vectors(&read_file(&cfg.vectors_path)?)?;
            let words = parse_words(&read_file(words_path)?);
            pair_records(vectors, words)?
        }
        CorpusFormat::Combined => parse_combined(&read_file(&cfg.vectors_path)?)?,
    };

    let sources = cfg
        .source_paths()
        .into_iter()
        .map(Path::to_path_buf)
        .collect();
    let corpus = Corpus::from_entries(entries, sources);

    let mismatched = corpus.mismatched_entries();
    if mismatched > 0 {
        warn!(
            mismatched,
            dimension = ?corpus.dimension(),
            path = %cfg.vectors_path.display(),
            "corpus_mixed_dimensions"
        );
    }
    info!(
        entries = corpus.len(),
        dimension = ?corpus.dimension(),
        format = ?cfg.format,
        elapsed_micros = start.elapsed().as_micros(),
        "corpus_loaded"
    );
    Ok(corpus)
}

fn read_file(path: &Path) -> Result<String, CorpusError> {
    fs::read_to_string(path).map_err(|e| CorpusError::read(path, e))
}
