//! Async handle on the reasoning service

use crate::credentials::CredentialPool;
use crate::pacing::RequestPacer;
use crate::LlmError;
use canon_domain::traits::{CompletionRequest, LlmProvider};
use std::sync::Arc;
use tracing::debug;

/// Shared, cheap-to-clone reasoning-service client
///
/// Clones share the provider, the credential pool and the pacer, so a
/// credential rotation or a reserved pacing slot is visible to every
/// holder.
pub struct ReasoningClient<L> {
    provider: Arc<L>,
    credentials: Arc<CredentialPool>,
    pacer: Arc<RequestPacer>,
}

impl<L> Clone for ReasoningClient<L> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            credentials: Arc::clone(&self.credentials),
            pacer: Arc::clone(&self.pacer),
        }
    }
}

impl<L> ReasoningClient<L>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
{
    /// Create a client that owns its provider, pool and pacer
    pub fn new(provider: L, credentials: CredentialPool, pacer: RequestPacer) -> Self {
        Self {
            provider: Arc::new(provider),
            credentials: Arc::new(credentials),
            pacer: Arc::new(pacer),
        }
    }

    /// Switch to the secondary credential; `false` if none is configured
    pub fn rotate_credential(&self) -> bool {
        self.credentials.rotate()
    }

    /// Send one request and return the raw message content
    ///
    /// Waits for a pacing slot, then runs the provider call on the blocking
    /// thread pool with the currently active credential.
    pub async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.pacer.wait_turn().await;

        let credential = self.credentials.active();
        let provider = Arc::clone(&self.provider);
        debug!("Calling reasoning service with credential {}", credential);

        tokio::task::spawn_blocking(move || provider.generate_structured(&request, &credential))
            .await
            .map_err(|e| LlmError::Other(format!("Provider task failed: {}", e)))?
    }
}
