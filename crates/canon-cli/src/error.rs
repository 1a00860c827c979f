//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No reasoning-service credential was supplied
    #[error("No API key found. Pass --api-key or set CANON_API_KEY (or GROQ_API_KEY).")]
    MissingCredential,

    /// Books directory unreadable or empty
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Index build or cache failure
    #[error("Index error: {0}")]
    Index(#[from] canon_store::IndexError),

    /// Reasoning-service setup failure
    #[error("LLM error: {0}")]
    Llm(#[from] canon_llm::LlmError),

    /// Claim decomposition failure
    #[error("Extraction error: {0}")]
    Extractor(#[from] canon_extractor::ExtractorError),

    /// Verifier setup failure
    #[error("Verifier error: {0}")]
    Verifier(#[from] canon_verifier::VerifierError),

    /// Validation run failure
    #[error("Runner error: {0}")]
    Runner(#[from] canon_runner::RunnerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Background task failed
    #[error("Task failed: {0}")]
    Task(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
