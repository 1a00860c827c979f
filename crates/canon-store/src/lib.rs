//! Canon Storage Layer
//!
//! Turns a corpus of novels into a searchable evidence index.
//!
//! # Architecture
//!
//! - [`TextChunker`]: overlapping word windows tagged with their position
//! - [`EvidenceIndex`]: exact cosine search scoped to one book, followed by
//!   reranking and a temporal boost
//! - [`IndexCache`]: SQLite persistence for embedded chunks
//! - [`HashingEmbeddingModel`] and [`LexicalReranker`]: local, deterministic
//!   implementations of the domain capability traits
//!
//! # Examples
//!
//! ```
//! use canon_domain::{Claim, ClaimType};
//! use canon_store::{
//!     ChunkingConfig, EvidenceIndex, HashingEmbeddingModel, LexicalReranker, RetrievalConfig,
//!     TextChunker,
//! };
//!
//! let chunker = TextChunker::new(ChunkingConfig { chunk_size: 8, overlap: 2 }).unwrap();
//! let mut index = EvidenceIndex::new(
//!     HashingEmbeddingModel::default(),
//!     LexicalReranker::new(),
//!     RetrievalConfig::default(),
//! )
//! .unwrap();
//! index.add_book("Moby Dick", "Call me Ishmael. Some years ago I went to sea.", &chunker).unwrap();
//!
//! let claim = Claim::new("Ishmael went to sea", ClaimType::General, vec!["Ishmael sea".into()]);
//! let evidence = index.search(&claim, "moby");
//! assert!(!evidence.is_empty());
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod chunking;
pub mod embedding;
pub mod index;
pub mod reranker;

pub use cache::{corpus_digest, CacheFingerprint, IndexCache};
pub use chunking::{ChunkingConfig, ChunkingError, Chunks, TextChunk, TextChunker};
pub use embedding::{cosine_similarity, EmbeddingError, HashingEmbeddingModel, HASHING_SCHEME};
pub use index::{EvidenceIndex, RetrievalConfig};
pub use reranker::LexicalReranker;

use thiserror::Error;

/// Errors that can occur while building, persisting or loading an index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Chunking configuration rejected
    #[error(transparent)]
    Chunking(#[from] ChunkingError),

    /// Embedding a chunk failed
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// A vector does not match the index width
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Width of the index
        expected: usize,
        /// Width of the offending vector
        actual: usize,
    },

    /// Retrieval configuration rejected
    #[error("Invalid retrieval configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
