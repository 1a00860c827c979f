//! Core ConsistencyVerifier implementation

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::outcome::{ClaimOutcome, StoryVerdict};
use crate::parser::parse_judgment;
use crate::prompt::{build_check_prompt, SYSTEM_PROMPT};
use canon_domain::traits::{CompletionRequest, EvidenceSource, LlmProvider};
use canon_domain::{Claim, ClaimJudgment, Evidence};
use canon_llm::{LlmError, ReasoningClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Judges claims against book evidence and aggregates a story verdict
///
/// Each claim moves through retrieve, then either skip (no evidence) or
/// judge. Judging makes up to `retry_budget` attempts. Rate limits rotate
/// the shared credential and back off before the next attempt; any other
/// failure abandons the claim at once.
pub struct ConsistencyVerifier<L, S> {
    client: ReasoningClient<L>,
    evidence: Arc<S>,
    config: VerifierConfig,
}

impl<L, S> ConsistencyVerifier<L, S>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: EvidenceSource + Send + Sync + 'static,
{
    /// Create a new verifier
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::Config`] if the configuration is invalid.
    pub fn new(
        client: ReasoningClient<L>,
        evidence: Arc<S>,
        config: VerifierConfig,
    ) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self {
            client,
            evidence,
            config,
        })
    }

    /// The verifier configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The evidence source claims are checked against
    pub fn evidence(&self) -> &S {
        &self.evidence
    }

    /// Verify every claim against one book and aggregate the result
    ///
    /// Claims are processed one at a time in order. Skipped and aborted
    /// claims contribute neither a verdict nor a rationale.
    pub async fn verify(&self, claims: &[Claim], book_title: &str) -> StoryVerdict {
        let mut outcomes = Vec::with_capacity(claims.len());
        for claim in claims {
            let outcome = self.verify_claim(claim, book_title).await;
            if let ClaimOutcome::Aborted(e) = &outcome {
                warn!("Abandoned claim '{}': {}", claim.text, e);
            }
            outcomes.push(outcome);
        }

        let verdict = StoryVerdict::from_outcomes(
            &outcomes,
            self.config.contradiction_threshold,
            &self.config.rationale_separator,
        );
        info!(
            "Verified {} claims against '{}': {} ({} recorded, {} skipped, {} aborted)",
            claims.len(),
            book_title,
            verdict.label,
            verdict.counts.recorded,
            verdict.counts.skipped,
            verdict.counts.aborted
        );
        verdict
    }

    /// Retrieve evidence for one claim and judge it
    pub async fn verify_claim(&self, claim: &Claim, book_title: &str) -> ClaimOutcome {
        let evidence = match self.retrieve(claim, book_title).await {
            Ok(evidence) => evidence,
            Err(e) => return ClaimOutcome::Aborted(e),
        };

        if evidence.is_empty() {
            debug!("No evidence for '{}' in '{}', skipping", claim.text, book_title);
            return ClaimOutcome::Skipped;
        }

        match self.judge(claim, &evidence).await {
            Ok(judgment) => {
                debug!(
                    "Claim '{}' judged {} ({:.2})",
                    claim.text,
                    judgment.verdict.as_str(),
                    judgment.confidence
                );
                ClaimOutcome::Recorded(judgment)
            }
            Err(e) => ClaimOutcome::Aborted(e),
        }
    }

    async fn retrieve(&self, claim: &Claim, book_title: &str) -> Result<Vec<Evidence>, VerifierError> {
        let source = Arc::clone(&self.evidence);
        let claim = claim.clone();
        let book_title = book_title.to_string();

        tokio::task::spawn_blocking(move || source.search(&claim, &book_title))
            .await
            .map_err(|e| VerifierError::Retrieval(e.to_string()))
    }

    async fn judge(&self, claim: &Claim, evidence: &[Evidence]) -> Result<ClaimJudgment, VerifierError> {
        let request = CompletionRequest::json(build_check_prompt(claim, evidence), self.config.temperature)
            .with_system(SYSTEM_PROMPT);

        let mut attempt = 0;
        loop {
            match self.client.complete(request.clone()).await {
                Ok(response) => return parse_judgment(&response),
                Err(e) if e.is_rate_limited() => {
                    let rotated = self.client.rotate_credential();
                    attempt += 1;
                    if attempt >= self.config.retry_budget {
                        return Err(e.into());
                    }

                    let delay = self.config.backoff(attempt - 1);
                    warn!(
                        "Rate limited on attempt {}/{} (secondary credential: {}); retrying in {:?}",
                        attempt, self.config.retry_budget, rotated, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
