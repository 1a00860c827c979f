//! Canon Extractor
//!
//! Decomposes a character backstory into atomic, verifiable claims using
//! the reasoning service.
//!
//! # Overview
//!
//! Each claim carries a category (temporal, relationship, location, trait
//! or general) and up to three search queries: a keyword query, a
//! descriptive query and an anti-evidence query that looks for
//! contradictions. The queries drive evidence retrieval downstream.
//!
//! # Architecture
//!
//! ```text
//! Backstory → ClaimExtractor → ReasoningClient → Claims → ConsistencyVerifier
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use canon_domain::Credential;
//! use canon_extractor::{ClaimExtractor, ExtractorConfig};
//! use canon_llm::{CredentialPool, MockProvider, ReasoningClient, RequestPacer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"claims": []}"#);
//! let client = ReasoningClient::new(
//!     llm,
//!     CredentialPool::single(Credential::new("primary", "sk")),
//!     RequestPacer::default(),
//! );
//! let extractor = ClaimExtractor::new(client, ExtractorConfig::default())?;
//!
//! let claims = extractor
//!     .decompose("Grew up on a whaling ship out of Nantucket.", "Ishmael")
//!     .await?;
//! println!("Extracted {} claims", claims.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ClaimExtractor;
pub use parser::parse_llm_response;
pub use prompt::PromptBuilder;
