//! Ollama Embedding Implementation
//!
//! Embeds text with a model served by a local Ollama instance, for runs
//! that want semantic rather than lexical retrieval.
//!
//! # Examples
//!
//! ```no_run
//! use canon_domain::traits::EmbeddingModel;
//! use canon_llm::OllamaEmbeddingModel;
//!
//! let model = OllamaEmbeddingModel::new("http://localhost:11434", "nomic-embed-text", 768).unwrap();
//! let vector = model.embed("The sky is blue").unwrap();
//! assert_eq!(vector.len(), 768);
//! ```

use crate::runtime::block_on;
use crate::LlmError;
use canon_domain::traits::EmbeddingModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Ollama embeddings API client
pub struct OllamaEmbeddingModel {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::Client,
}

/// Request body for Ollama embeddings API
#[derive(Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response from Ollama embeddings API
#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbeddingModel {
    /// Create a new Ollama embedding model
    ///
    /// `dimension` is the width the model is expected to return; any other
    /// width is reported as an invalid response.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimension,
            client,
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embed text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - The returned vector has the wrong width
    pub async fn embed_async(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&OllamaEmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        let body: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if body.embedding.len() != self.dimension {
            return Err(LlmError::InvalidResponse(format!(
                "Expected {} dimensions, got {}",
                self.dimension,
                body.embedding.len()
            )));
        }
        Ok(body.embedding)
    }
}

impl EmbeddingModel for OllamaEmbeddingModel {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        if text.trim().is_empty() {
            return Err(LlmError::Other("Empty text cannot be embedded".to_string()));
        }
        block_on(self.embed_async(text))?
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = OllamaEmbeddingModel::new("http://localhost:11434/", "nomic-embed-text", 768).unwrap();
        assert_eq!(model.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(model.model(), "nomic-embed-text");
        assert_eq!(model.dimension(), 768);
    }

    #[test]
    fn test_empty_text_rejected_without_network() {
        let model = OllamaEmbeddingModel::new("http://127.0.0.1:9", "m", 8).unwrap();
        assert!(model.embed("   ").is_err());
    }

    #[test]
    fn test_unreachable_endpoint() {
        let model = OllamaEmbeddingModel::new("http://127.0.0.1:9", "m", 8).unwrap();
        assert!(matches!(model.embed("text"), Err(LlmError::Communication(_))));
    }

    // Requires a running Ollama with the model pulled
    #[test]
    #[ignore]
    fn test_ollama_embed_integration() {
        let model = OllamaEmbeddingModel::new(DEFAULT_ENDPOINT, "nomic-embed-text", 768).unwrap();
        let vector = model.embed("Say hello").unwrap();
        assert_eq!(vector.len(), 768);
    }
}
