//! Local text embeddings
//!
//! [`HashingEmbeddingModel`] turns text into a vector by hashing each
//! lower-cased word into one of `dimension` buckets with a signed count,
//! then normalising to unit length. Texts that share words end up close
//! under cosine similarity, which is enough for lexical retrieval without
//! model files or a network round trip.
//!
//! Buckets come from BLAKE3, whose output is fixed by its specification, so
//! vectors saved in an index cache stay comparable with freshly embedded
//! queries across builds. Any change to the bucket layout must bump
//! [`HASHING_SCHEME`].
//!
//! # Examples
//!
//! ```rust
//! use canon_domain::traits::EmbeddingModel;
//! use canon_store::embedding::{cosine_similarity, HashingEmbeddingModel};
//!
//! let model = HashingEmbeddingModel::new(256);
//! let a = model.embed("Edmond was imprisoned in the Chateau d'If").unwrap();
//! let b = model.embed("the prisoner of the Chateau d'If").unwrap();
//! let c = model.embed("a whale hunt off Nantucket").unwrap();
//! assert!(cosine_similarity(&a, &b) > cosine_similarity(&a, &c));
//! ```

use canon_domain::traits::EmbeddingModel;
use thiserror::Error;

/// Default embedding width
pub const DEFAULT_DIMENSION: usize = 384;

/// Identifier of the token-to-bucket layout
pub const HASHING_SCHEME: &str = "hashing-v1";

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}

/// Feature-hashing embedding model
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: vectors have unit length unless the text has no words
/// - **Lexical**: shared words raise similarity
#[derive(Debug, Clone)]
pub struct HashingEmbeddingModel {
    dimension: usize,
}

impl HashingEmbeddingModel {
    /// Create a new hashing model producing vectors of `dimension` length
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Stable layout name, for cache fingerprints
    pub fn scheme(&self) -> &'static str {
        HASHING_SCHEME
    }

    /// First eight bytes of the token's BLAKE3 digest, little-endian
    fn token_hash(token: &str) -> u64 {
        let digest = blake3::hash(token.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

impl Default for HashingEmbeddingModel {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingModel for HashingEmbeddingModel {
    type Error = EmbeddingError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = Self::token_hash(&token.to_lowercase());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            embedding[bucket] += sign;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in [-1, 1]; a zero vector has similarity 0 with anything.
///
/// # Panics
///
/// Panics if vectors have different lengths
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_deterministic() {
        let model = HashingEmbeddingModel::new(384);

        let text = "The quick brown fox jumps over the lazy dog";
        let embedding1 = model.embed(text).unwrap();
        let embedding2 = model.embed(text).unwrap();

        assert_eq!(embedding1, embedding2, "Same text should produce same embedding");
    }

    #[test]
    fn test_embedding_dimension() {
        let model = HashingEmbeddingModel::new(128);

        let embedding = model.embed("test").unwrap();
        assert_eq!(embedding.len(), 128);
        assert_eq!(model.dimension(), 128);
    }

    #[test]
    fn test_embedding_normalized() {
        let model = HashingEmbeddingModel::new(384);

        let embedding = model.embed("test text").unwrap();
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001, "Embedding should be normalized");
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        let model = HashingEmbeddingModel::new(384);

        let a = model.embed("The cat sat on the mat").unwrap();
        let b = model.embed("the CAT sat, on the mat.").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_shared_words_raise_similarity() {
        let model = HashingEmbeddingModel::new(384);

        let query = model.embed("Dantes escaped from prison").unwrap();
        let near = model.embed("after years in prison Dantes escaped by the sea").unwrap();
        let far = model.embed("the orchestra tuned their violins").unwrap();
        assert!(cosine_similarity(&query, &near) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_bucket_layout_is_pinned() {
        let model = HashingEmbeddingModel::new(64);

        let lighthouse = model.embed("lighthouse").unwrap();
        assert_eq!(lighthouse[25], 1.0);
        assert_eq!(lighthouse.iter().filter(|v| **v != 0.0).count(), 1);

        let whale = model.embed("Whale").unwrap();
        assert_eq!(whale[31], -1.0);

        assert_eq!(HashingEmbeddingModel::token_hash("lighthouse"), 408443247397231705);
        assert_eq!(model.scheme(), "hashing-v1");
    }

    #[test]
    fn test_empty_text() {
        let model = HashingEmbeddingModel::new(384);

        let result = model.embed("  ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty text"));
    }

    #[test]
    fn test_punctuation_only_is_zero_vector() {
        let model = HashingEmbeddingModel::new(16);
        let embedding = model.embed("-- ... !!").unwrap();
        assert!(embedding.iter().all(|v| *v == 0.0));
        assert_eq!(cosine_similarity(&embedding, &embedding), 0.0);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec, &vec);
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![0.0, 1.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![-1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!((similarity + 1.0).abs() < 0.0001);
    }
}
