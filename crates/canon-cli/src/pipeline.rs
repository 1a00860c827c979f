//! Wiring the index, reasoning client, extractor and verifier together.

use crate::config::Config;
use crate::corpus::read_books;
use crate::embedder::Embedder;
use crate::error::{CliError, Result};
use canon_domain::Credential;
use canon_extractor::ClaimExtractor;
use canon_llm::{ChatCompletionsProvider, CredentialPool, ReasoningClient, RequestPacer};
use canon_store::{
    corpus_digest, CacheFingerprint, EvidenceIndex, IndexCache, IndexError, LexicalReranker,
    TextChunker,
};
use canon_verifier::ConsistencyVerifier;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Evidence index used by the binary.
pub type Index = EvidenceIndex<Embedder, LexicalReranker>;

/// Reasoning-service provider used by the binary.
pub type Provider = ChatCompletionsProvider;

/// Environment variables consulted when no primary key is passed.
pub const PRIMARY_KEY_FALLBACKS: &[&str] = &["GROQ_API_KEY"];

/// Environment variables consulted when no secondary key is passed.
pub const SECONDARY_KEY_FALLBACKS: &[&str] = &["GROQ_API_KEY_2", "GROQ_API_KEY_SECONDARY"];

/// Where an index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// Chunked and embedded from the books directory
    Built,
    /// Loaded from a cache whose fingerprint matched
    Cached,
}

/// Load the index from `cache` when its fingerprint matches the current
/// settings and the books in `books_dir`, otherwise build it from
/// `books_dir` and refresh the cache. `rebuild` skips the cache lookup but
/// still refreshes it.
///
/// Blocking: embedding may call out to a server. Run it off the async
/// worker threads, see [`prepare_index`].
pub fn load_or_build_index(
    config: &Config,
    books_dir: &Path,
    cache: Option<&Path>,
    rebuild: bool,
) -> Result<(Index, IndexSource)> {
    let books = read_books(books_dir)?;
    let embedder = Embedder::from_config(&config.embedding)?;
    let fingerprint = CacheFingerprint {
        chunk_size: config.chunking.chunk_size,
        overlap: config.chunking.overlap,
        dimension: config.embedding.dimension,
        model: embedder.model_id(),
        corpus: corpus_digest(books.iter().map(|b| (b.name.as_str(), b.text.as_str()))),
    };
    let mut index =
        EvidenceIndex::new(embedder, LexicalReranker::new(), config.retrieval.clone())?;

    let mut cache = cache.map(IndexCache::open).transpose()?;
    if let Some(cache) = cache.as_ref().filter(|_| !rebuild) {
        match cache.fingerprint()? {
            Some(stored) if stored == fingerprint => {
                let entries = cache.load()?;
                if !entries.is_empty() {
                    for (record, vector) in entries {
                        index.insert(record, vector)?;
                    }
                    info!("Loaded {} chunks from index cache", index.len());
                    return Ok((index, IndexSource::Cached));
                }
            }
            Some(stored) => {
                warn!(
                    "Index cache built with {:?}; rebuilding for {:?}",
                    stored, fingerprint
                );
            }
            None => {}
        }
    }

    let chunker = TextChunker::new(config.chunking).map_err(IndexError::from)?;
    info!("Indexing {} books from {}", books.len(), books_dir.display());
    for book in &books {
        index.add_book(&book.name, &book.text, &chunker)?;
    }
    info!("Indexed {} chunks", index.len());

    if let Some(cache) = cache.as_mut() {
        let entries = index.entries().map(|(_, record, vector)| (record, vector));
        let saved = cache.save(&fingerprint, entries)?;
        info!("Saved {} chunks to index cache", saved);
    }
    Ok((index, IndexSource::Built))
}

/// Run [`load_or_build_index`] on the blocking pool.
pub async fn prepare_index(
    config: &Config,
    books_dir: PathBuf,
    cache: Option<PathBuf>,
    rebuild: bool,
) -> Result<(Index, IndexSource)> {
    let config = config.clone();
    let task = tokio::task::spawn_blocking(move || {
        load_or_build_index(&config, &books_dir, cache.as_deref(), rebuild)
    });
    task.await.map_err(|e| CliError::Task(e.to_string()))?
}

/// Chunk counts per book, in title order.
pub fn chunk_counts(index: &Index) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, record, _) in index.entries() {
        *counts.entry(record.book_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Resolve the primary and optional secondary credentials.
///
/// Explicit values win; otherwise the fallback environment variables are
/// tried in order. Blank values count as absent.
pub fn resolve_credentials(
    primary: Option<String>,
    secondary: Option<String>,
) -> Result<CredentialPool> {
    let primary = non_blank(primary)
        .or_else(|| from_env(PRIMARY_KEY_FALLBACKS))
        .ok_or(CliError::MissingCredential)?;
    let secondary = non_blank(secondary).or_else(|| from_env(SECONDARY_KEY_FALLBACKS));

    Ok(CredentialPool::new(
        Credential::new("primary", primary),
        secondary.map(|key| Credential::new("secondary", key)),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn from_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| non_blank(std::env::var(name).ok()))
}

/// Extractor and verifier sharing one reasoning client.
pub struct Components {
    /// Claim decomposition
    pub extractor: ClaimExtractor<Provider>,
    /// Claim verification over the index
    pub verifier: ConsistencyVerifier<Provider, Index>,
}

/// Build the reasoning client and both reasoning components.
pub fn build_components(
    config: &Config,
    index: Index,
    credentials: CredentialPool,
) -> Result<Components> {
    let provider = ChatCompletionsProvider::new(
        &config.llm.endpoint,
        &config.llm.model,
        config.llm.timeout_secs,
    )?;
    let client = ReasoningClient::new(
        provider,
        credentials,
        RequestPacer::new(config.llm.inter_call_delay()),
    );

    let extractor = ClaimExtractor::new(client.clone(), config.extractor.clone())?;
    let verifier = ConsistencyVerifier::new(client, Arc::new(index), config.verifier.clone())?;
    Ok(Components {
        extractor,
        verifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_store::ChunkingConfig;
    use std::fs;

    fn small_config() -> Config {
        Config {
            chunking: ChunkingConfig {
                chunk_size: 8,
                overlap: 2,
            },
            ..Default::default()
        }
    }

    fn books_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Moby Dick.txt"),
            "Call me Ishmael. Some years ago never mind how long precisely having little money",
        )
        .unwrap();
        fs::write(dir.path().join("Emma.txt"), "Emma Woodhouse handsome clever and rich").unwrap();
        dir
    }

    #[test]
    fn test_build_then_reuse_cache() {
        let books = books_dir();
        let cache_dir = tempfile::tempdir().unwrap();
        let cache = cache_dir.path().join("index.sqlite");
        let config = small_config();

        let (built, source) = load_or_build_index(&config, books.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Built);
        assert_eq!(chunk_counts(&built).get("Emma"), Some(&1));

        let (cached, source) = load_or_build_index(&config, books.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Cached);
        assert_eq!(cached.len(), built.len());
    }

    #[test]
    fn test_changed_settings_rebuild() {
        let books = books_dir();
        let cache_dir = tempfile::tempdir().unwrap();
        let cache = cache_dir.path().join("index.sqlite");

        load_or_build_index(&small_config(), books.path(), Some(&cache), false).unwrap();

        let mut config = small_config();
        config.chunking.chunk_size = 4;
        config.chunking.overlap = 1;
        let (_, source) = load_or_build_index(&config, books.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Built);

        let (_, source) = load_or_build_index(&config, books.path(), Some(&cache), true).unwrap();
        assert_eq!(source, IndexSource::Built);
    }

    #[test]
    fn test_different_books_rebuild() {
        let cache_dir = tempfile::tempdir().unwrap();
        let cache = cache_dir.path().join("index.sqlite");
        let config = small_config();

        let first = tempfile::tempdir().unwrap();
        fs::write(first.path().join("Moby Dick.txt"), "Call me Ishmael").unwrap();
        load_or_build_index(&config, first.path(), Some(&cache), false).unwrap();

        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("Emma.txt"), "Emma Woodhouse handsome clever and rich").unwrap();
        let (index, source) = load_or_build_index(&config, second.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Built);
        assert_eq!(index.books(), vec!["Emma"]);

        // Same titles, edited text
        fs::write(second.path().join("Emma.txt"), "Emma Woodhouse married Mr Knightley").unwrap();
        let (_, source) = load_or_build_index(&config, second.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Built);

        let (_, source) = load_or_build_index(&config, second.path(), Some(&cache), false).unwrap();
        assert_eq!(source, IndexSource::Cached);
    }

    #[test]
    fn test_explicit_credentials() {
        let pool = resolve_credentials(Some("sk-1".to_string()), Some("sk-2".to_string())).unwrap();
        assert_eq!(pool.active().secret(), "sk-1");
        assert!(pool.has_secondary());
    }
}
