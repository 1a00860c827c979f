//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Claim, Credential, Evidence};

/// Trait for text embedding models
///
/// Implemented by the infrastructure layer (canon-store, canon-llm)
pub trait EmbeddingModel {
    /// Error type for embedding operations
    type Error: std::fmt::Display;

    /// Generate an embedding vector for the given text
    ///
    /// Every call within a run must return vectors of [`dimension`](Self::dimension) length.
    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;
}

/// Trait for pairwise relevance scoring
///
/// Implemented by the infrastructure layer (canon-store)
pub trait Reranker {
    /// Error type for scoring operations
    type Error: std::fmt::Display;

    /// Score how relevant `doc` is to `query`; higher is more relevant
    ///
    /// Scores are only comparable within one query.
    fn score(&self, query: &str, doc: &str) -> Result<f32, Self::Error>;
}

/// A completion request for the reasoning service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system message
    pub system: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the service to return a JSON object
    pub json_mode: bool,
}

impl CompletionRequest {
    /// Create a JSON-mode request with no system message
    pub fn json(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature,
            json_mode: true,
        }
    }

    /// Attach a system message
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Trait for reasoning-service (LLM) providers
///
/// Implemented by the infrastructure layer (canon-llm). The credential is
/// passed on every call so the caller owns rotation.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion, returning the raw message content
    fn generate_structured(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<String, Self::Error>;
}

/// Trait for book-scoped evidence retrieval
///
/// Implemented by the evidence index (canon-store). Retrieval never fails:
/// an empty result means no evidence was found.
pub trait EvidenceSource {
    /// Return evidence for `claim` from the book whose name contains `book_title`
    fn search(&self, claim: &Claim, book_title: &str) -> Vec<Evidence>;

    /// Number of searchable chunks across all books
    fn len(&self) -> usize;

    /// Whether there is nothing to search
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
