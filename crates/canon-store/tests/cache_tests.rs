//! Integration tests for the SQLite index cache

use canon_domain::{Claim, ClaimType};
use canon_store::{
    corpus_digest, CacheFingerprint, ChunkingConfig, EvidenceIndex, HashingEmbeddingModel, IndexCache,
    IndexError, LexicalReranker, RetrievalConfig, TextChunker,
};
use tempfile::TempDir;

const JANE_EYRE: &str = "Jane was sent to Lowood school where Helen Burns became her friend. \
                         Later Jane became governess at Thornfield Hall and met Mr Rochester.";

fn fingerprint() -> CacheFingerprint {
    CacheFingerprint {
        chunk_size: 12,
        overlap: 3,
        dimension: 64,
        model: "hashing-v1".to_string(),
        corpus: corpus_digest([("Jane Eyre", JANE_EYRE)]),
    }
}

fn build_index() -> EvidenceIndex<HashingEmbeddingModel, LexicalReranker> {
    let chunker = TextChunker::new(ChunkingConfig { chunk_size: 12, overlap: 3 }).unwrap();
    let mut index = EvidenceIndex::new(
        HashingEmbeddingModel::new(64),
        LexicalReranker::new(),
        RetrievalConfig::default(),
    )
    .unwrap();
    index
        .add_book("Jane Eyre", JANE_EYRE, &chunker)
        .unwrap();
    index
}

#[test]
fn test_save_and_reload_preserves_search() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.db");
    let original = build_index();

    {
        let mut cache = IndexCache::open(&path).unwrap();
        let saved = cache
            .save(&fingerprint(), original.entries().map(|(_, r, v)| (r, v)))
            .unwrap();
        assert_eq!(saved, original.len());
    }

    let cache = IndexCache::open(&path).unwrap();
    assert_eq!(cache.fingerprint().unwrap(), Some(fingerprint()));

    let mut reloaded = EvidenceIndex::new(
        HashingEmbeddingModel::new(64),
        LexicalReranker::new(),
        RetrievalConfig::default(),
    )
    .unwrap();
    for (record, vector) in cache.load().unwrap() {
        reloaded.insert(record, vector).unwrap();
    }

    let claim = Claim::new(
        "Jane met Helen Burns at school",
        ClaimType::Relationship,
        vec!["Helen Burns Lowood".to_string()],
    );
    assert_eq!(original.search(&claim, "eyre"), reloaded.search(&claim, "eyre"));
}

#[test]
fn test_save_replaces_previous_contents() {
    let mut cache = IndexCache::open(":memory:").unwrap();
    let index = build_index();

    cache
        .save(&fingerprint(), index.entries().map(|(_, r, v)| (r, v)))
        .unwrap();
    cache
        .save(&fingerprint(), index.entries().take(1).map(|(_, r, v)| (r, v)))
        .unwrap();

    assert_eq!(cache.load().unwrap().len(), 1);
}

#[test]
fn test_save_rejects_mismatched_width() {
    let mut cache = IndexCache::open(":memory:").unwrap();
    let index = build_index();
    let narrow = CacheFingerprint {
        dimension: 32,
        ..fingerprint()
    };

    let result = cache.save(&narrow, index.entries().map(|(_, r, v)| (r, v)));
    assert!(matches!(
        result,
        Err(IndexError::DimensionMismatch { expected: 32, actual: 64 })
    ));
    assert_eq!(cache.fingerprint().unwrap(), None);
}

#[test]
fn test_fingerprint_records_corpus() {
    let mut cache = IndexCache::open(":memory:").unwrap();
    let index = build_index();
    cache
        .save(&fingerprint(), index.entries().map(|(_, r, v)| (r, v)))
        .unwrap();

    let stored = cache.fingerprint().unwrap().unwrap();
    assert_eq!(stored.corpus, corpus_digest([("Jane Eyre", JANE_EYRE)]));

    let other_books = CacheFingerprint {
        corpus: corpus_digest([("Villette", "Lucy Snowe")]),
        ..fingerprint()
    };
    assert_ne!(stored, other_books);
}
