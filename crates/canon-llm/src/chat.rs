//! OpenAI-compatible chat completions provider
//!
//! Speaks the `/chat/completions` dialect shared by Groq, OpenAI and most
//! hosted inference services. JSON mode sets
//! `response_format = {"type": "json_object"}`.
//!
//! # Examples
//!
//! ```no_run
//! use canon_domain::traits::{CompletionRequest, LlmProvider};
//! use canon_domain::Credential;
//! use canon_llm::ChatCompletionsProvider;
//!
//! let provider = ChatCompletionsProvider::new(
//!     "https://api.groq.com/openai/v1",
//!     "llama3-70b-8192",
//!     60,
//! )
//! .unwrap();
//! let key = Credential::new("primary", std::env::var("GROQ_API_KEY").unwrap());
//! let reply = provider
//!     .generate_structured(&CompletionRequest::json("Return {\"ok\": true}", 0.0), &key)
//!     .unwrap();
//! ```

use crate::runtime::block_on;
use crate::LlmError;
use canon_domain::traits::{CompletionRequest, LlmProvider as LlmProviderTrait};
use canon_domain::Credential;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default endpoint (Groq's OpenAI-compatible API)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat completions API provider
pub struct ChatCompletionsProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }

    /// Create a provider for the default endpoint and model
    pub fn groq() -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS)
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }

    /// Send one completion request
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!("POST {} with credential {}", url, credential);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.secret())
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, &self.model, error_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }
}

fn classify_status(status: StatusCode, model: &str, body: String) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(body),
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

impl LlmProviderTrait for ChatCompletionsProvider {
    type Error = LlmError;

    fn generate_structured(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<String, Self::Error> {
        block_on(self.complete(request, credential))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = ChatCompletionsProvider::new("http://localhost:8080/v1/", "test-model", 5).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8080/v1");
        assert_eq!(provider.model(), "test-model");
    }

    #[test]
    fn test_request_body_shape() {
        let provider = ChatCompletionsProvider::groq().unwrap();
        let request = CompletionRequest::json("Claim: x", 0.0).with_system("You are a strict fact-checker.");
        let body = serde_json::to_value(provider.body(&request)).unwrap();

        assert_eq!(body["model"], "llama3-70b-8192");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Claim: x");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_plain_request_has_no_response_format() {
        let provider = ChatCompletionsProvider::groq().unwrap();
        let mut request = CompletionRequest::json("hi", 0.5);
        request.json_mode = false;
        let body = serde_json::to_value(provider.body(&request)).unwrap();

        assert!(body.get("response_format").is_none());
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_status_classification() {
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "m", String::new()).is_rate_limited());
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, "m", String::new()),
            LlmError::ModelNotAvailable("m".to_string())
        );
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "m", "oops".to_string()),
            LlmError::Communication(_)
        ));
    }

    #[test]
    fn test_unreachable_endpoint_is_communication_error() {
        let provider = ChatCompletionsProvider::new("http://127.0.0.1:9", "m", 2).unwrap();
        let key = Credential::new("primary", "sk");
        let result = provider.generate_structured(&CompletionRequest::json("x", 0.0), &key);
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
