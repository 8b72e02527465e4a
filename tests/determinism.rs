mod common;

use std::sync::Arc;

use common::{TableEmbedder, service, write_file};
use tempfile::TempDir;
use wordsim::{CorpusConfig, MatchConfig, PipelineConfig, StubEmbedder};

/// Corpus where several words share the exact same vector.
fn tied_corpus(dir: &TempDir) -> CorpusConfig {
    let vectors = "0,1\n1,0\n2,0\n0.5,0.5\n1,0\n3,0\n";
    let words = "up\nalpha\nbravo\ndiag\ncharlie\ndelta\n";
    CorpusConfig::paired(
        write_file(dir.path(), "v.txt", vectors),
        write_file(dir.path(), "w.txt", words),
    )
}

#[tokio::test]
async fn ties_resolve_by_file_order() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(TableEmbedder::new([("east", vec![1.0, 0.0])]));
    let service = service(
        embedder,
        tied_corpus(&dir),
        MatchConfig::default(),
        PipelineConfig::default(),
    );

    let suggestions = service.suggest("east", Some(4)).await.unwrap();
    let words: Vec<_> = suggestions.hits.iter().map(|h| h.word.as_str()).collect();
    assert_eq!(words, ["alpha", "bravo", "charlie", "delta"]);
}

#[tokio::test]
async fn repeated_requests_return_identical_rankings() {
    let dir = TempDir::new().unwrap();
    let stub = StubEmbedder::new(16);
    let words: Vec<String> = (0..200).map(|i| format!("word{i}")).collect();
    let vectors: String = words
        .iter()
        .map(|w| {
            let row: Vec<String> = stub.vector_for(w).iter().map(f64::to_string).collect();
            format!("{}\n", row.join(","))
        })
        .collect();
    let corpus = CorpusConfig::paired(
        write_file(dir.path(), "v.txt", &vectors),
        write_file(dir.path(), "w.txt", &words.join("\n")),
    );
    let service = service(
        Arc::new(stub),
        corpus,
        MatchConfig::default(),
        PipelineConfig::default(),
    );

    let first = service.suggest("some probe phrase", Some(10)).await.unwrap();
    assert_eq!(first.hits.len(), 10);
    for _ in 0..5 {
        let again = service.suggest("some probe phrase", Some(10)).await.unwrap();
        assert_eq!(again.hits, first.hits);
    }
}

#[tokio::test]
async fn parallel_and_sequential_scans_agree_through_the_service() {
    let dir = TempDir::new().unwrap();
    let n = 3_000;
    let vectors: String = (0..n)
        .map(|i| format!("{},{},{}\n", (i % 7) as f64, (i % 11) as f64, 1.0))
        .collect();
    let words: String = (0..n).map(|i| format!("w{i}\n")).collect();
    let corpus = CorpusConfig::paired(
        write_file(dir.path(), "v.txt", &vectors),
        write_file(dir.path(), "w.txt", &words),
    );
    let embedder = || Arc::new(TableEmbedder::new([("q", vec![0.3, 0.7, 0.2])]));

    let sequential = service(
        embedder(),
        corpus.clone(),
        MatchConfig {
            parallel_threshold: usize::MAX,
            ..MatchConfig::default()
        },
        PipelineConfig::default(),
    );
    let parallel = service(
        embedder(),
        corpus,
        MatchConfig {
            parallel_threshold: 1,
            ..MatchConfig::default()
        },
        PipelineConfig::default(),
    );

    let a = sequential.suggest("q", Some(50)).await.unwrap();
    let b = parallel.suggest("q", Some(50)).await.unwrap();
    assert_eq!(a.hits, b.hits);
}
