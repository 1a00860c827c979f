//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Canon - check character backstories against the novels they belong to.
#[derive(Debug, Parser)]
#[command(name = "canon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chunk and embed a books directory into an index cache
    Index(IndexArgs),

    /// Validate a labelled dataset and write a results file
    Validate(ValidateArgs),

    /// Check a single backstory against one book
    Check(CheckArgs),
}

/// Where the books live and where the index is cached.
#[derive(Debug, Clone, Args)]
pub struct CorpusArgs {
    /// Directory with one text file per book
    #[arg(short, long, default_value = "books")]
    pub books: PathBuf,

    /// SQLite index cache; reused when the settings and books match
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

/// Reasoning-service credentials.
#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// Primary API key (falls back to GROQ_API_KEY)
    #[arg(long, env = "CANON_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Secondary API key used after a rate limit (falls back to GROQ_API_KEY_2)
    #[arg(long, env = "CANON_SECONDARY_API_KEY", hide_env_values = true)]
    pub secondary_api_key: Option<String>,
}

/// Arguments for the index command.
#[derive(Debug, Args)]
pub struct IndexArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Rebuild even if the cache matches
    #[arg(long)]
    pub rebuild: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Labelled dataset (CSV)
    pub dataset: PathBuf,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Results file
    #[arg(short, long, default_value = "results.csv")]
    pub output: PathBuf,

    /// Only process the first N rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Book title (file stem in the books directory)
    #[arg(long = "book")]
    pub book: String,

    /// Backstory text
    pub backstory: String,

    /// Character the backstory is about
    #[arg(long, default_value = canon_runner::UNKNOWN_CHARACTER)]
    pub character: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}
