//! Embedding backend selected by configuration.

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::Result;
use canon_domain::traits::EmbeddingModel;
use canon_llm::OllamaEmbeddingModel;
use canon_store::HashingEmbeddingModel;

/// Either of the supported embedding models.
pub enum Embedder {
    /// Local feature hashing
    Hashing(HashingEmbeddingModel),
    /// Ollama server
    Ollama(OllamaEmbeddingModel),
}

impl Embedder {
    /// Build the configured backend.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        Ok(match config.backend {
            EmbeddingBackend::Hashing => {
                Embedder::Hashing(HashingEmbeddingModel::new(config.dimension))
            }
            EmbeddingBackend::Ollama => Embedder::Ollama(OllamaEmbeddingModel::new(
                &config.endpoint,
                &config.model,
                config.dimension,
            )?),
        })
    }

    /// Identifier stored in the index cache fingerprint.
    pub fn model_id(&self) -> String {
        match self {
            Embedder::Hashing(model) => model.scheme().to_string(),
            Embedder::Ollama(model) => format!("ollama:{}", model.model()),
        }
    }
}

impl EmbeddingModel for Embedder {
    type Error = String;

    fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, String> {
        match self {
            Embedder::Hashing(model) => model.embed(text).map_err(|e| e.to_string()),
            Embedder::Ollama(model) => model.embed(text).map_err(|e| e.to_string()),
        }
    }

    fn dimension(&self) -> usize {
        match self {
            Embedder::Hashing(model) => model.dimension(),
            Embedder::Ollama(model) => model.dimension(),
        }
    }
}
