//! Canon Verifier
//!
//! Judges each claim against evidence from its book and folds the
//! judgments into one story-level verdict.
//!
//! A story is labelled a contradiction (0) when at least one claim comes
//! back CONTRADICT with confidence at or above the threshold, and
//! consistent (1) otherwise. Claims without evidence and claims whose
//! judgment failed are left out of both the label and the rationale.
//!
//! # Example Usage
//!
//! ```no_run
//! use canon_domain::Credential;
//! use canon_llm::{CredentialPool, MockProvider, ReasoningClient, RequestPacer};
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
//!     MockProvider::new(r#"{"verdict": "SUPPORT", "confidence": 0.9}"#),
//!     CredentialPool::single(Credential::new("primary", "sk")),
//!     RequestPacer::default(),
//! );
//! let verifier = ConsistencyVerifier::new(client, Arc::new(index), VerifierConfig::default())?;
//!
//! let verdict = verifier.verify(&[], "Great Expectations").await;
//! println!("{}: {}", verdict.label, verdict.rationale);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod outcome;
mod parser;
mod prompt;
mod verifier;


pub use config::VerifierConfig;
pub use error::VerifierError;
pub use outcome::{ClaimOutcome, OutcomeCounts, StoryVerdict};
pub use parser::parse_judgment;
pub use prompt::{build_check_prompt, format_evidence, SYSTEM_PROMPT};
pub use verifier::ConsistencyVerifier;
