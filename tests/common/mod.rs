#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use wordsim::{
    CorpusCache, CorpusConfig, Embedder, Matcher, MatchConfig, PipelineConfig, SemanticEmbedding,
    SemanticError, SuggestionService,
};

/// Embedder that looks words up in a fixed table.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f64>>,
}

impl TableEmbedder {
    pub fn new<'a>(rows: impl IntoIterator<Item = (&'a str, Vec<f64>)>) -> Self {
        Self {
            table: rows
                .into_iter()
                .map(|(w, v)| (w.to_string(), v))
                .collect(),
        }
    }
}

#[async_trait]
impl Embedder for TableEmbedder {
    async fn embed(&self, text: &str) -> Result<SemanticEmbedding, SemanticError> {
        let vector = self
            .table
            .get(text)
            .cloned()
            .ok_or_else(|| SemanticError::Inference(format!("no embedding for `{text}`")))?;
        Ok(SemanticEmbedding {
            text: text.to_string(),
            embedding_dim: vector.len(),
            vector,
            model_name: "table".into(),
            normalized: false,
        })
    }

    fn model_name(&self) -> &str {
        "table"
    }
}

/// Embedder that never answers in time.
pub struct StalledEmbedder(pub Duration);

#[async_trait]
impl Embedder for StalledEmbedder {
    async fn embed(&self, _text: &str) -> Result<SemanticEmbedding, SemanticError> {
        tokio::time::sleep(self.0).await;
        Err(SemanticError::Request("stalled".into()))
    }

    fn model_name(&self) -> &str {
        "stalled"
    }
}

pub fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}

/// `cat`/`dog`/`car` corpus in paired files.
pub fn cat_dog_car_files() -> (TempDir, CorpusConfig) {
    let dir = TempDir::new().expect("tempdir");
    let vectors = write_file(dir.path(), "embeddings.txt", "1,0\n0.9,0.1\n0,1\n");
    let words = write_file(dir.path(), "words.txt", "cat\ndog\ncar\n");
    (dir, CorpusConfig::paired(vectors, words))
}

pub fn service(
    embedder: Arc<dyn Embedder>,
    corpus: CorpusConfig,
    search: MatchConfig,
    pipeline: PipelineConfig,
) -> SuggestionService {
    SuggestionService::new(
        embedder,
        Arc::new(CorpusCache::new(corpus)),
        Matcher::new(search).expect("valid match config"),
        pipeline,
    )
}

/// Embeds the three corpus words plus `kitten`, which sits right next to `cat`.
pub fn animal_embedder() -> Arc<dyn Embedder> {
    Arc::new(TableEmbedder::new([
        ("cat", vec![1.0, 0.0]),
        ("kitten", vec![1.0, 0.0]),
        ("dog", vec![0.9, 0.1]),
        ("car", vec![0.0, 1.0]),
    ]))
}
