//! Canon LLM Provider Layer
//!
//! Reasoning-service and embedding providers plus the shared plumbing that
//! every caller of the reasoning service goes through.
//!
//! # Architecture
//!
//! Providers implement the synchronous `LlmProvider` trait from
//! `canon-domain`. Async components never call them directly; they go
//! through a [`ReasoningClient`], which owns the run-wide
//! [`CredentialPool`] and [`RequestPacer`] and dispatches each call on the
//! blocking thread pool.
//!
//! # Providers
//!
//! - [`MockProvider`]: Scripted responses for testing
//! - [`ChatCompletionsProvider`]: OpenAI-compatible chat completions API
//! - [`OllamaEmbeddingModel`]: Local Ollama embeddings
//!
//! # Examples
//!
//! ```
//! use canon_domain::traits::{CompletionRequest, LlmProvider};
//! use canon_domain::Credential;
//! use canon_llm::MockProvider;
//!
//! let provider = MockProvider::new("{}");
//! provider.push_response(r#"{"claims": []}"#);
//!
//! let key = Credential::new("primary", "sk-test");
//! let request = CompletionRequest::json("decompose", 0.1);
//! assert_eq!(provider.generate_structured(&request, &key).unwrap(), r#"{"claims": []}"#);
//! assert_eq!(provider.generate_structured(&request, &key).unwrap(), "{}");
//! assert_eq!(provider.call_count(), 2);
//! ```

#![warn(missing_docs)]

pub mod chat;
pub mod client;
pub mod config;
pub mod credentials;
pub mod ollama;
pub mod pacing;
pub mod response;
mod runtime;

use canon_domain::traits::{CompletionRequest, LlmProvider as LlmProviderTrait};
use canon_domain::Credential;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use chat::ChatCompletionsProvider;
pub use client::ReasoningClient;
pub use config::LlmConfig;
pub use credentials::CredentialPool;
pub use ollama::OllamaEmbeddingModel;
pub use pacing::RequestPacer;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether the service asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited(_))
    }
}

/// A call observed by [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Label of the credential the call was made with
    pub credential: String,

    /// The request as received
    pub request: CompletionRequest,
}

#[derive(Debug, Default)]
struct MockState {
    keyed: Vec<(String, String)>,
    script: VecDeque<Result<String, LlmError>>,
    calls: Vec<MockCall>,
}

/// Mock LLM provider for deterministic testing
///
/// Responses are chosen in this order:
///
/// 1. The first keyed response whose key occurs in the prompt
/// 2. The next scripted response or error, consumed in FIFO order
/// 3. The default response
///
/// Clones share state, so a test can keep a handle for inspection after
/// moving the provider into a client.
///
/// # Examples
///
/// ```
/// use canon_domain::traits::{CompletionRequest, LlmProvider};
/// use canon_domain::Credential;
/// use canon_llm::{LlmError, MockProvider};
///
/// let provider = MockProvider::default();
/// provider.push_error(LlmError::RateLimited("429".into()));
/// provider.respond_to("Check Consistency", r#"{"verdict": "SUPPORT"}"#);
///
/// let key = Credential::new("primary", "sk");
/// let plain = CompletionRequest::json("hello", 0.0);
/// assert!(provider.generate_structured(&plain, &key).unwrap_err().is_rate_limited());
///
/// let check = CompletionRequest::json("Task: Check Consistency.", 0.0);
/// assert!(provider.generate_structured(&check, &key).unwrap().contains("SUPPORT"));
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fallback response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Answer every prompt containing `key` with `response`
    pub fn respond_to(&self, key: impl Into<String>, response: impl Into<String>) {
        self.state().keyed.push((key.into(), response.into()));
    }

    /// Queue a response
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().script.push_back(Ok(response.into()));
    }

    /// Queue a failure
    pub fn push_error(&self, error: LlmError) {
        self.state().script.push_back(Err(error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Credential labels used by each call, in order
    pub fn credentials_used(&self) -> Vec<String> {
        self.state().calls.iter().map(|c| c.credential.clone()).collect()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate_structured(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.calls.push(MockCall {
            credential: credential.label().to_string(),
            request: request.clone(),
        });

        if let Some((_, response)) = state
            .keyed
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
        {
            return Ok(response.clone());
        }

        match state.script.pop_front() {
            Some(result) => result,
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Credential {
        Credential::new("primary", "sk-primary")
    }

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest::json(prompt, 0.0)
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured(&request("any prompt"), &key());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_script_is_fifo() {
        let provider = MockProvider::default();
        provider.push_response("first");
        provider.push_error(LlmError::Other("boom".to_string()));
        provider.push_response("third");

        assert_eq!(provider.generate_structured(&request("a"), &key()).unwrap(), "first");
        assert!(provider.generate_structured(&request("b"), &key()).is_err());
        assert_eq!(provider.generate_structured(&request("c"), &key()).unwrap(), "third");
        assert_eq!(
            provider.generate_structured(&request("d"), &key()).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_keyed_responses_take_priority() {
        let provider = MockProvider::default();
        provider.push_response("scripted");
        provider.respond_to("hello", "world");

        assert_eq!(provider.generate_structured(&request("say hello"), &key()).unwrap(), "world");
        assert_eq!(provider.generate_structured(&request("other"), &key()).unwrap(), "scripted");
    }

    #[test]
    fn test_mock_provider_records_calls() {
        let provider = MockProvider::new("test");
        let clone = provider.clone();

        assert_eq!(provider.call_count(), 0);
        provider.generate_structured(&request("p1"), &key()).unwrap();
        provider
            .generate_structured(&request("p2"), &Credential::new("secondary", "sk-2"))
            .unwrap();

        assert_eq!(clone.call_count(), 2);
        assert_eq!(clone.credentials_used(), vec!["primary", "secondary"]);
        assert_eq!(clone.calls()[1].request.prompt, "p2");
    }

    #[test]
    fn test_rate_limit_classification() {
        assert!(LlmError::RateLimited("429".to_string()).is_rate_limited());
        assert!(!LlmError::Communication("down".to_string()).is_rate_limited());
    }
}
