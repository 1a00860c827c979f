//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use canon_extractor::ExtractorConfig;
use canon_llm::LlmConfig;
use canon_runner::RunnerConfig;
use canon_store::{ChunkingConfig, RetrievalConfig};
use canon_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration: one table per component.
///
/// Credentials are never read from this file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chunk window
    pub chunking: ChunkingConfig,

    /// Evidence retrieval
    pub retrieval: RetrievalConfig,

    /// Embedding backend
    pub embedding: EmbeddingConfig,

    /// Reasoning service
    pub llm: LlmConfig,

    /// Claim decomposition
    pub extractor: ExtractorConfig,

    /// Claim verification
    pub verifier: VerifierConfig,

    /// Batch validation
    pub runner: RunnerConfig,

    /// Display settings
    pub settings: Settings,
}

/// Which embedding model to index and search with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local feature hashing; needs no service
    #[default]
    Hashing,
    /// A local Ollama server
    Ollama,
}

/// Embedding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend
    pub backend: EmbeddingBackend,

    /// Vector width
    pub dimension: usize,

    /// Ollama base URL
    pub endpoint: String,

    /// Ollama model name
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Hashing,
            dimension: 384,
            endpoint: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find config directory".into()))?;
        Ok(dir.join("canon").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every component's settings.
    pub fn validate(&self) -> Result<()> {
        let check = |section: &str, result: std::result::Result<(), String>| {
            result.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))
        };

        check("chunking", self.chunking.validate().map_err(|e| e.to_string()))?;
        check("retrieval", self.retrieval.validate())?;
        check("llm", self.llm.validate())?;
        check("extractor", self.extractor.validate())?;
        check("verifier", self.verifier.validate())?;
        check("runner", self.runner.validate())?;
        if self.embedding.dimension == 0 {
            return Err(CliError::Config("[embedding] dimension must be greater than 0".into()));
        }
        Ok(())
    }
}
