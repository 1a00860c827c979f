//! Core ClaimExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use canon_domain::traits::{CompletionRequest, LlmProvider};
use canon_domain::Claim;
use canon_llm::{LlmError, ReasoningClient};
use tracing::{debug, info, warn};

/// Turns a backstory into atomic, searchable claims
pub struct ClaimExtractor<L> {
    client: ReasoningClient<L>,
    config: ExtractorConfig,
}

impl<L> ClaimExtractor<L>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
{
    /// Create a new ClaimExtractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(client: ReasoningClient<L>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { client, config })
    }

    /// The extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Decompose a backstory into claims
    ///
    /// Makes at most two attempts. After a failed first attempt the client
    /// switches to the secondary credential when one is configured, and the
    /// identical request is sent again. A second failure is returned.
    pub async fn decompose(
        &self,
        backstory: &str,
        character: &str,
    ) -> Result<Vec<Claim>, ExtractorError> {
        let prompt = PromptBuilder::new(backstory, character)
            .with_max_claims(self.config.max_claims)
            .build();
        debug!("Decomposition prompt length: {} chars", prompt.len());

        let request = CompletionRequest::json(prompt, self.config.temperature);

        let claims = match self.attempt(request.clone()).await {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Decomposition failed for '{}': {}; retrying once", character, e);
                self.client.rotate_credential();
                self.attempt(request).await?
            }
        };

        info!("Decomposed backstory for '{}' into {} claims", character, claims.len());
        Ok(claims)
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<Vec<Claim>, ExtractorError> {
        let response = self.client.complete(request).await?;
        debug!("LLM response length: {} chars", response.len());
        parse_llm_response(&response, self.config.max_claims, self.config.max_queries)
    }
}
