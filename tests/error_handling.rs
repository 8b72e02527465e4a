mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    StalledEmbedder, TableEmbedder, animal_embedder, cat_dog_car_files, service, write_file,
};
use tempfile::TempDir;
use wordsim::{
    CorpusConfig, CorpusError, MatchConfig, PipelineConfig, PipelineError, Stage,
};

#[tokio::test]
async fn blank_input_returns_empty_suggestions() {
    let service = service(
        animal_embedder(),
        CorpusConfig::paired("/missing/v.txt", "/missing/w.txt"),
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let suggestions = service.suggest("  \t ", None).await.unwrap();
    assert!(suggestions.hits.is_empty());
    assert!(suggestions.embedding_error.is_none());
}

#[tokio::test]
async fn missing_corpus_file_is_reported_not_swallowed() {
    let service = service(
        animal_embedder(),
        CorpusConfig::paired("/missing/v.txt", "/missing/w.txt"),
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let err = service.suggest("cat", None).await.unwrap_err();
    assert!(matches!(err, PipelineError::Corpus(CorpusError::Read { .. })));
}

#[tokio::test]
async fn short_word_file_is_an_alignment_error() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusConfig::paired(
        write_file(dir.path(), "v.txt", "1,0\n0.9,0.1\n0,1\n"),
        write_file(dir.path(), "w.txt", "cat\ndog\n"),
    );
    let service = service(
        animal_embedder(),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let err = service.suggest("cat", None).await.unwrap_err();
    assert!(matches!(err, PipelineError::Corpus(CorpusError::Alignment(_))));
}

#[tokio::test]
async fn malformed_vector_line_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusConfig::paired(
        write_file(dir.path(), "v.txt", "1,0\nnot,numbers\n"),
        write_file(dir.path(), "w.txt", "cat\ndog\n"),
    );
    let service = service(
        animal_embedder(),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let err = service.suggest("cat", None).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Corpus(CorpusError::Parse { line: 2, .. })
    ));
}

#[tokio::test]
async fn embedding_failure_degrades_to_empty_suggestions() {
    let (_dir, corpus) = cat_dog_car_files();
    let service = service(
        animal_embedder(),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    // The table embedder has no entry for this word.
    let suggestions = service.suggest("[zebra]", None).await.unwrap();
    assert!(suggestions.hits.is_empty());
    assert_eq!(suggestions.lookup(), Some("zebra"));
    assert!(suggestions.embedding_error.unwrap().contains("zebra"));
}

#[tokio::test]
async fn empty_embedding_degrades_to_empty_suggestions() {
    let (_dir, corpus) = cat_dog_car_files();
    let service = service(
        Arc::new(TableEmbedder::new([("hollow", Vec::new())])),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let suggestions = service.suggest("hollow", None).await.unwrap();
    assert!(suggestions.hits.is_empty());
    assert_eq!(suggestions.lookup(), Some("hollow"));
    assert!(suggestions.embedding_error.unwrap().contains("empty vector"));
}

#[tokio::test]
async fn slow_embedder_times_out() {
    let (_dir, corpus) = cat_dog_car_files();
    let service = service(
        Arc::new(StalledEmbedder(Duration::from_secs(5))),
        corpus,
        MatchConfig::default(),
        PipelineConfig {
            embed_timeout_ms: 20,
            ..PipelineConfig::default()
        },
    );
    let err = service.suggest("cat", None).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Timeout {
            stage: Stage::Embedding,
            timeout_ms: 20
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn mismatched_corpus_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusConfig::paired(
        write_file(dir.path(), "v.txt", "1,0\n1,0,0\n0,1\n"),
        write_file(dir.path(), "w.txt", "cat\nodd\ncar\n"),
    );
    let service = service(
        animal_embedder(),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );
    let suggestions = service.suggest("kitten", None).await.unwrap();
    let words: Vec<_> = suggestions.hits.iter().map(|h| h.word.as_str()).collect();
    assert_eq!(words, ["cat", "car"]);
    assert_eq!(suggestions.skipped, 1);
}
