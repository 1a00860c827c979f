//! Book-scoped evidence retrieval
//!
//! The index keeps every chunk of every book next to its embedding. A
//! search runs in three passes over the chunks whose book name contains
//! the requested title:
//!
//! 1. **Candidates**: for each search query, the most cosine-similar
//!    chunks in scope, unioned across queries in first-seen order
//! 2. **Rerank**: each candidate is scored against the claim text
//! 3. **Temporal boost**: early-temporal claims lift chunks from the
//!    opening of the book
//!
//! The best [`RetrievalConfig::final_top_k`] candidates come back as
//! [`Evidence`].

use crate::chunking::TextChunker;
use crate::embedding::cosine_similarity;
use crate::IndexError;
use canon_domain::traits::{EmbeddingModel, EvidenceSource, Reranker};
use canon_domain::{ChunkId, ChunkRecord, Claim, Evidence};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Retrieval parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Nearest chunks kept per search query
    pub candidates_per_query: usize,

    /// Evidence items returned per claim
    pub final_top_k: usize,

    /// Score added to early chunks for early-temporal claims
    pub temporal_boost: f32,

    /// Chunks strictly before this relative position count as early
    pub early_position_cutoff: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidates_per_query: 15,
            final_top_k: 5,
            temporal_boost: 1.0,
            early_position_cutoff: 0.2,
        }
    }
}

impl RetrievalConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.candidates_per_query == 0 {
            return Err("candidates_per_query must be greater than 0".to_string());
        }
        if self.final_top_k == 0 {
            return Err("final_top_k must be greater than 0".to_string());
        }
        if !self.temporal_boost.is_finite() {
            return Err("temporal_boost must be finite".to_string());
        }
        if !(0.0..=1.0).contains(&self.early_position_cutoff) {
            return Err(format!(
                "early_position_cutoff must be in [0.0, 1.0], got {}",
                self.early_position_cutoff
            ));
        }
        Ok(())
    }
}

/// In-memory chunk index with exact cosine search
///
/// Chunk ids are dense and assigned in insertion order. The index is
/// immutable once searches begin, so it can be shared behind an `Arc`.
pub struct EvidenceIndex<E, R> {
    chunks: Vec<ChunkRecord>,
    vectors: Vec<Vec<f32>>,
    embedder: E,
    reranker: R,
    config: RetrievalConfig,
}

impl<E: EmbeddingModel, R: Reranker> EvidenceIndex<E, R> {
    /// Create an empty index
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidConfig`] if the retrieval configuration
    /// does not validate.
    pub fn new(embedder: E, reranker: R, config: RetrievalConfig) -> Result<Self, IndexError> {
        config.validate().map_err(IndexError::InvalidConfig)?;
        Ok(Self {
            chunks: Vec::new(),
            vectors: Vec::new(),
            embedder,
            reranker,
            config,
        })
    }

    /// Chunk, embed and add one book
    ///
    /// Returns the number of chunks added. A book with no words adds nothing.
    pub fn add_book(
        &mut self,
        book_name: &str,
        text: &str,
        chunker: &TextChunker,
    ) -> Result<usize, IndexError> {
        let mut added = 0;
        for chunk in chunker.chunk(text) {
            let vector = self
                .embedder
                .embed(&chunk.text)
                .map_err(|e| IndexError::Embedding(e.to_string()))?;
            let record = ChunkRecord::new(book_name, chunk.text, chunk.relative_position);
            self.insert(record, vector)?;
            added += 1;
        }
        debug!("Indexed {} chunks for '{}'", added, book_name);
        Ok(added)
    }

    /// Add a pre-embedded chunk
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] if the vector width differs
    /// from the embedding model's.
    pub fn insert(&mut self, record: ChunkRecord, vector: Vec<f32>) -> Result<ChunkId, IndexError> {
        let expected = self.embedder.dimension();
        if vector.len() != expected {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        let id = ChunkId::from_value(self.chunks.len());
        self.chunks.push(record);
        self.vectors.push(vector);
        Ok(id)
    }

    /// Number of chunks in the index
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over all chunks with their ids and vectors
    pub fn entries(&self) -> impl Iterator<Item = (ChunkId, &ChunkRecord, &[f32])> {
        self.chunks
            .iter()
            .zip(self.vectors.iter())
            .enumerate()
            .map(|(i, (record, vector))| (ChunkId::from_value(i), record, vector.as_slice()))
    }

    /// Distinct book names, in first-indexed order
    pub fn books(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.chunks
            .iter()
            .map(|c| c.book_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// The retrieval configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Ids of chunks whose book name contains `book_title`, case-insensitively
    ///
    /// A blank title matches nothing.
    pub fn scope(&self, book_title: &str) -> Vec<ChunkId> {
        let needle = book_title.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.book_name.to_lowercase().contains(&needle))
            .map(|(i, _)| ChunkId::from_value(i))
            .collect()
    }

    /// Union of per-query nearest neighbours within the book scope
    ///
    /// Order is query order, then similarity rank; duplicates keep their
    /// first position. Queries that fail to embed are skipped.
    pub fn candidates(&self, claim: &Claim, book_title: &str) -> Vec<ChunkId> {
        let scope = self.scope(book_title);
        self.candidates_in(claim, &scope)
    }

    fn candidates_in(&self, claim: &Claim, scope: &[ChunkId]) -> Vec<ChunkId> {
        let per_query = self.config.candidates_per_query.min(scope.len());
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for query in &claim.queries {
            let query_vector = match self.embedder.embed(query) {
                Ok(v) if v.len() == self.embedder.dimension() => v,
                Ok(v) => {
                    warn!(
                        "Query embedding has width {} (expected {}), skipping query",
                        v.len(),
                        self.embedder.dimension()
                    );
                    continue;
                }
                Err(e) => {
                    warn!("Failed to embed query '{}': {}", query, e);
                    continue;
                }
            };

            let mut ranked: Vec<(ChunkId, f32)> = scope
                .iter()
                .map(|id| (*id, cosine_similarity(&query_vector, &self.vectors[id.value()])))
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

            for (id, _) in ranked.into_iter().take(per_query) {
                if seen.insert(id) {
                    candidates.push(id);
                }
            }
        }

        candidates
    }

    /// Retrieve reranked evidence for a claim from one book
    ///
    /// Returns an empty list when no chunk matches the title, the index is
    /// empty, or every query fails. Never errors.
    pub fn search(&self, claim: &Claim, book_title: &str) -> Vec<Evidence> {
        let scope = self.scope(book_title);
        if scope.is_empty() {
            debug!("No chunks match book title '{}'", book_title);
            return Vec::new();
        }

        let candidates = self.candidates_in(claim, &scope);
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(ChunkId, f32)> = candidates
            .into_iter()
            .filter_map(|id| {
                match self.reranker.score(&claim.text, &self.chunks[id.value()].text) {
                    Ok(score) => Some((id, score)),
                    Err(e) => {
                        warn!("Reranker failed on {}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        if claim.is_early_temporal() {
            for (id, score) in &mut scored {
                if self.chunks[id.value()].relative_position < self.config.early_position_cutoff {
                    *score += self.config.temporal_boost;
                }
            }
        }

        // Stable: equal scores keep candidate order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.final_top_k);

        debug!(
            "Retrieved {} evidence items for claim '{}' in '{}'",
            scored.len(),
            claim.text,
            book_title
        );

        scored
            .into_iter()
            .map(|(id, score)| {
                let chunk = &self.chunks[id.value()];
                Evidence {
                    chunk_text: chunk.text.clone(),
                    score,
                    relative_position: chunk.relative_position,
                    book_name: chunk.book_name.clone(),
                }
            })
            .collect()
    }
}

impl<E: EmbeddingModel, R: Reranker> EvidenceSource for EvidenceIndex<E, R> {
    fn search(&self, claim: &Claim, book_title: &str) -> Vec<Evidence> {
        EvidenceIndex::search(self, claim, book_title)
    }

    fn len(&self) -> usize {
        EvidenceIndex::len(self)
    }
}
