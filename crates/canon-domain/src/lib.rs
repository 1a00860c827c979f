//! Canon Domain Layer
//!
//! This crate contains the data model shared by every Canon component and the
//! trait interfaces for the external capabilities the checker depends on.
//! It has ZERO external dependencies.
//!
//! ## Key Concepts
//!
//! - **Chunk**: A position-tagged window of words from one book
//! - **Claim**: An atomic, verifiable statement extracted from a backstory,
//!   with the search queries used to find evidence for it
//! - **Evidence**: A reranked passage returned for a claim, scoped to one book
//! - **Judgment**: The reasoning service's verdict on one claim
//! - **Story record**: The predicted label for one dataset row
//!
//! ## Architecture
//!
//! Infrastructure (embedding models, rerankers, reasoning-service clients)
//! lives in other crates and plugs in through [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod claim;
pub mod credential;
pub mod evidence;
pub mod judgment;
pub mod story;
pub mod traits;

// Re-exports for convenience
pub use chunk::{ChunkId, ChunkRecord};
pub use claim::{Claim, ClaimType};
pub use credential::Credential;
pub use evidence::Evidence;
pub use judgment::{ClaimJudgment, Verdict};
pub use story::{Label, RowOutcome, StoryRecord};
