use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::config::CorpusConfig;
use crate::error::CorpusError;
use crate::load_corpus;
use crate::types::Corpus;

/// Size and modification time of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

struct CachedCorpus {
    corpus: Arc<Corpus>,
    stamps: Vec<FileStamp>,
}

/// Process-wide, load-once / read-many corpus cache.
///
/// Readers clone an `Arc<Corpus>` out of the slot and search it without holding
/// any lock. [`get`](Self::get) stats the source files and re-parses only when a
/// file's size or mtime changed. Reloads are serialized and parse outside the
/// slot lock, so readers keep the previous snapshot until the swap.
pub struct CorpusCache {
    config: CorpusConfig,
    slot: RwLock<Option<CachedCorpus>>,
    reload: Mutex<()>,
}

impl CorpusCache {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
            reload: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Current snapshot, reloading first if the files changed since the last load.
    pub fn get(&self) -> Result<Arc<Corpus>, CorpusError> {
        let stamps = self.stamp_sources()?;
        if let Some(corpus) = self.cached_if_fresh(&stamps) {
            return Ok(corpus);
        }

        let _reload = self.reload.lock().unwrap_or_else(|p| p.into_inner());
        // Another caller may have finished the same reload while we waited.
        if let Some(corpus) = self.cached_if_fresh(&stamps) {
            return Ok(corpus);
        }
        debug!(path = %self.config.vectors_path.display(), "corpus_stale");
        self.load_and_swap(stamps)
    }

    /// Force a reload regardless of file stamps.
    pub fn refresh(&self) -> Result<Arc<Corpus>, CorpusError> {
        let _reload = self.reload.lock().unwrap_or_else(|p| p.into_inner());
        let stamps = self.stamp_sources()?;
        self.load_and_swap(stamps)
    }

    /// The cached snapshot without touching the filesystem.
    pub fn snapshot(&self) -> Option<Arc<Corpus>> {
        self.read_slot()
            .as_ref()
            .map(|cached| Arc::clone(&cached.corpus))
    }

    /// Drop the cached snapshot; the next [`get`](Self::get) reloads.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        *slot = None;
    }

    fn cached_if_fresh(&self, stamps: &[FileStamp]) -> Option<Arc<Corpus>> {
        self.read_slot()
            .as_ref()
            .filter(|cached| cached.stamps == stamps)
            .map(|cached| Arc::clone(&cached.corpus))
    }

    fn load_and_swap(&self, stamps: Vec<FileStamp>) -> Result<Arc<Corpus>, CorpusError> {
        let corpus = Arc::new(load_corpus(&self.config)?);
        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        *slot = Some(CachedCorpus {
            corpus: Arc::clone(&corpus),
            stamps,
        });
        info!(
            entries = corpus.len(),
            dimension = ?corpus.dimension(),
            "corpus_cached"
        );
        Ok(corpus)
    }

    fn stamp_sources(&self) -> Result<Vec<FileStamp>, CorpusError> {
        self.config
            .source_paths()
            .into_iter()
            .map(|path| {
                let meta = fs::metadata(path).map_err(|e| CorpusError::read(path, e))?;
                Ok(FileStamp {
                    path: path.to_path_buf(),
                    len: meta.len(),
                    modified: meta.modified().ok(),
                })
            })
            .collect()
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, Option<CachedCorpus>> {
        self.slot.read().unwrap_or_else(|p| p.into_inner())
    }
}
