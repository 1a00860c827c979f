//! Error types for the ConsistencyVerifier

use canon_llm::LlmError;
use thiserror::Error;

/// Errors that abandon a single claim
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifierError {
    /// Reasoning-service error, including an exhausted rate-limit budget
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Response could not be read as a judgment
    #[error("Invalid judgment format: {0}")]
    InvalidFormat(String),

    /// Evidence retrieval task failed
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerifierError {
    /// Whether this failure came from an exhausted rate-limit budget
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, VerifierError::Llm(e) if e.is_rate_limited())
    }
}
