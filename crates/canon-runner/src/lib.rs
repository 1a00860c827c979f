//! Canon Runner
//!
//! Batch validation of backstories against their books over a labelled
//! dataset.
//!
//! # Overview
//!
//! For each row the runner reads the backstory, book title, character and
//! ground-truth label (with fallbacks across column names), normalises the
//! label, decomposes the backstory into claims and verifies them. The run
//! always yields one [`StoryRecord`](canon_domain::StoryRecord) per row:
//!
//! | Row | Prediction | Truth | Rationale |
//! |-----|------------|-------|-----------|
//! | Verified | story verdict | normalised label | joined rationales |
//! | Missing backstory or book | 0 | normalised label | none |
//! | Processing failed | 1 | per [`CrashFallback`] | none |
//!
//! After the run, [`ClassificationReport`] scores the predictions and
//! [`write_results`] writes the `id,truth,prediction,rationale` file.
//!
//! # Usage
//!
//! ```no_run
//! use canon_domain::Credential;
//! use canon_extractor::{ClaimExtractor, ExtractorConfig};
//! use canon_llm::{CredentialPool, MockProvider, ReasoningClient, RequestPacer};
//! use canon_runner::{write_results_file, Dataset, RunnerConfig, ValidationRunner};
//! use canon_store::{EvidenceIndex, HashingEmbeddingModel, LexicalReranker, RetrievalConfig};
//! use canon_verifier::{ConsistencyVerifier, VerifierConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = EvidenceIndex::new(
//!     HashingEmbeddingModel::default(),
//!     LexicalReranker::default(),
//!     RetrievalConfig::default(),
//! )?;
//! let client = ReasoningClient::new(
//!     MockProvider::default(),
//!     CredentialPool::single(Credential::new("primary", "sk")),
//!     RequestPacer::default(),
//! );
//! let extractor = ClaimExtractor::new(client.clone(), ExtractorConfig::default())?;
//! let verifier = ConsistencyVerifier::new(client, Arc::new(index), VerifierConfig::default())?;
//! let runner = ValidationRunner::new(extractor, verifier, RunnerConfig::default())?;
//!
//! let run = runner.run(&Dataset::from_path("train.csv")?).await?;
//! write_results_file("results.csv", run.records())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod dataset;
mod error;
mod label;
mod metrics;
mod output;
mod runner;

pub use config::{CrashFallback, RunnerConfig};
pub use dataset::{Dataset, DatasetRow, UNKNOWN_CHARACTER};
pub use error::{RowError, RunnerError};
pub use label::{normalize_label, RawLabel};
pub use metrics::{ClassScores, ClassificationReport, MetricsError};
pub use output::{write_results, write_results_file};
pub use runner::{ValidationRun, ValidationRunner};
