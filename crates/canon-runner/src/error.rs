//! Error types for validation runs

use canon_extractor::ExtractorError;
use thiserror::Error;

/// Errors that stop a run
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Dataset could not be read
    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    /// Results could not be written
    #[error("Output error: {0}")]
    Output(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The evidence index holds no chunks
    #[error("Evidence index is empty; index the books before validating")]
    EmptyIndex,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A failure contained at the row boundary
///
/// Verification failures never reach this point; they abandon single
/// claims inside the verifier.
#[derive(Error, Debug)]
pub enum RowError {
    /// Claim decomposition failed after its retry
    #[error("Decomposition failed: {0}")]
    Decomposition(#[from] ExtractorError),
}
