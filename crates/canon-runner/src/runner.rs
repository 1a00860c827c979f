//! Batch validation over a labelled dataset

use crate::config::RunnerConfig;
use crate::dataset::{Dataset, DatasetRow};
use crate::error::{RowError, RunnerError};
use crate::label::normalize_label;
use crate::metrics::{ClassificationReport, MetricsError};
use canon_domain::traits::{EvidenceSource, LlmProvider};
use canon_domain::{RowOutcome, StoryRecord};
use canon_extractor::ClaimExtractor;
use canon_llm::LlmError;
use canon_verifier::{ConsistencyVerifier, StoryVerdict};
use tracing::{debug, error, info, warn};

/// Records produced by one run, in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRun {
    records: Vec<StoryRecord>,
}

impl ValidationRun {
    /// One record per processed row
    pub fn records(&self) -> &[StoryRecord] {
        &self.records
    }

    /// Truth labels in row order
    pub fn truths(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.truth_label).collect()
    }

    /// Predicted labels in row order
    pub fn predictions(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.predicted_label).collect()
    }

    /// Number of rows with the given outcome
    pub fn count(&self, outcome: RowOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Accuracy and per-class scores
    pub fn report(&self) -> Result<ClassificationReport, MetricsError> {
        ClassificationReport::compute(&self.truths(), &self.predictions())
    }
}

/// Runs extraction and verification over every dataset row
///
/// Rows are processed one at a time. A row can never abort the run: rows
/// without a backstory or book are recorded as skipped, and rows whose
/// processing fails get the configured [`CrashFallback`](crate::CrashFallback)
/// record.
pub struct ValidationRunner<L, S> {
    extractor: ClaimExtractor<L>,
    verifier: ConsistencyVerifier<L, S>,
    config: RunnerConfig,
}

impl<L, S> ValidationRunner<L, S>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: EvidenceSource + Send + Sync + 'static,
{
    /// Create a new runner
    ///
    /// The extractor and verifier should be built from clones of one
    /// `ReasoningClient` so they share credentials and pacing.
    pub fn new(
        extractor: ClaimExtractor<L>,
        verifier: ConsistencyVerifier<L, S>,
        config: RunnerConfig,
    ) -> Result<Self, RunnerError> {
        config.validate().map_err(RunnerError::Config)?;
        Ok(Self {
            extractor,
            verifier,
            config,
        })
    }

    /// The runner configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Validate every row (or the first `limit` rows) of a dataset
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::EmptyIndex`] before touching any row if the
    /// evidence index has no chunks.
    pub async fn run(&self, dataset: &Dataset) -> Result<ValidationRun, RunnerError> {
        if self.verifier.evidence().is_empty() {
            return Err(RunnerError::EmptyIndex);
        }

        let rows = match self.config.limit {
            Some(limit) => dataset.head(limit),
            None => dataset.rows(),
        };
        info!("Validating {} stories", rows.len());

        let mut records = Vec::with_capacity(rows.len());
        for (n, row) in rows.iter().enumerate() {
            debug!("Row {}/{} (id {})", n + 1, rows.len(), row.id());
            records.push(self.process_row(row).await);
        }

        let run = ValidationRun { records };
        info!(
            "Validation finished: {} verified, {} skipped, {} failed",
            run.count(RowOutcome::Verified),
            run.count(RowOutcome::Skipped),
            run.count(RowOutcome::Failed)
        );
        Ok(run)
    }

    /// Process one row into its result record
    pub async fn process_row(&self, row: &DatasetRow) -> StoryRecord {
        let id = row.id();
        let truth = normalize_label(&row.label);

        let Some((backstory, book)) = row.inputs() else {
            warn!("Row {} skipped: missing book or backstory", row.index);
            return StoryRecord {
                id,
                truth_label: truth,
                predicted_label: 0,
                rationale: None,
                outcome: RowOutcome::Skipped,
            };
        };

        match self.check_story(backstory, book, row.character()).await {
            Ok(verdict) => StoryRecord {
                id,
                truth_label: truth,
                predicted_label: verdict.predicted_label(),
                rationale: Some(verdict.rationale),
                outcome: RowOutcome::Verified,
            },
            Err(e) => {
                error!("Row {} failed: {}", row.index, e);
                let (truth_label, predicted_label) = self.config.crash_fallback.labels(truth);
                StoryRecord {
                    id,
                    truth_label,
                    predicted_label,
                    rationale: None,
                    outcome: RowOutcome::Failed,
                }
            }
        }
    }

    /// Decompose one backstory and verify its claims against a book
    pub async fn check_story(
        &self,
        backstory: &str,
        book: &str,
        character: &str,
    ) -> Result<StoryVerdict, RowError> {
        let claims = self.extractor.decompose(backstory, character).await?;
        Ok(self.verifier.verify(&claims, book).await)
    }
}
