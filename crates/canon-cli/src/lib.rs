//! Canon CLI library.
//!
//! Configuration loading, the books-directory reader, index preparation and
//! output formatting behind the `canon` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod embedder;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
