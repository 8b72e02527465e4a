use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// One vocabulary word and its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusEntry {
    /// Position in the corpus. Stable across reloads of identical files.
    pub index: usize,
    /// Word label resolved from the word file (or the combined record).
    pub word: String,
    /// Embedding values in file order.
    pub vector: Vec<f64>,
}

impl CorpusEntry {
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Immutable, ordered snapshot of a loaded corpus.
///
/// Snapshots are shared as `Arc<Corpus>`; nothing mutates an entry after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    dimension: Option<usize>,
    sources: Vec<PathBuf>,
    loaded_at: SystemTime,
}

impl Corpus {
    /// Build a corpus from `(word, vector)` pairs, assigning indices in iteration order.
    pub fn from_pairs<I, W>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, Vec<f64>)>,
        W: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (word, vector))| CorpusEntry {
                index,
                word: word.into(),
                vector,
            })
            .collect();
        Self::from_entries(entries, Vec::new())
    }

    pub(crate) fn from_entries(entries: Vec<CorpusEntry>, sources: Vec<PathBuf>) -> Self {
        let dimension = entries.first().map(CorpusEntry::dimension);
        Self {
            entries,
            dimension,
            sources,
            loaded_at: SystemTime::now(),
        }
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension of the first entry; `None` for an empty corpus.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of entries whose length differs from [`dimension`](Self::dimension).
    pub fn mismatched_entries(&self) -> usize {
        match self.dimension {
            Some(dim) => self.entries.iter().filter(|e| e.dimension() != dim).count(),
            None => 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.word.as_str())
    }

    /// Index of the first entry labelled `word`.
    pub fn position(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word == word)
    }

    /// Files this snapshot was parsed from (empty for in-memory corpora).
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Corpus {
        Corpus::from_pairs(vec![
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.9, 0.1]),
            ("car", vec![0.0, 1.0]),
        ])
    }

    #[test]
    fn from_pairs_assigns_indices_in_order() {
        let corpus = sample();
        assert_eq!(corpus.len(), 3);
        for (i, entry) in corpus.entries().iter().enumerate() {
            assert_eq!(entry.index, i);
        }
        assert_eq!(corpus.word(1), Some("dog"));
        assert_eq!(corpus.word(3), None);
    }

    #[test]
    fn dimension_comes_from_first_entry() {
        assert_eq!(sample().dimension(), Some(2));
        let empty = Corpus::from_pairs(Vec::<(String, Vec<f64>)>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.dimension(), None);
        assert_eq!(empty.mismatched_entries(), 0);
    }

    #[test]
    fn position_returns_first_match() {
        let corpus = Corpus::from_pairs(vec![
            ("a", vec![1.0]),
            ("b", vec![2.0]),
            ("a", vec![3.0]),
        ]);
        assert_eq!(corpus.position("a"), Some(0));
        assert_eq!(corpus.position("b"), Some(1));
        assert_eq!(corpus.position("zzz"), None);
    }

    #[test]
    fn counts_mismatched_entries() {
        let corpus = Corpus::from_pairs(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 0.0, 0.0]),
            ("c", vec![0.0, 1.0]),
        ]);
        assert_eq!(corpus.mismatched_entries(), 1);
    }
}
