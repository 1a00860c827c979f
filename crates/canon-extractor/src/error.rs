//! Error types for the Extractor

use canon_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during decomposition
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Reasoning-service error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Response is JSON but not the expected shape
    #[error("Invalid claim format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
