//! Per-claim outcomes and story-level aggregation

use crate::error::VerifierError;
use canon_domain::{ClaimJudgment, Label};

/// What happened to one claim
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// No evidence in scope; the claim contributes nothing
    Skipped,

    /// The reasoning service returned a usable judgment
    Recorded(ClaimJudgment),

    /// Judgment failed; the claim contributes nothing
    Aborted(VerifierError),
}

impl ClaimOutcome {
    /// The judgment, if one was recorded
    pub fn judgment(&self) -> Option<&ClaimJudgment> {
        match self {
            ClaimOutcome::Recorded(judgment) => Some(judgment),
            _ => None,
        }
    }
}

/// Tally of claim outcomes for one story
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    /// Claims with a recorded judgment
    pub recorded: usize,
    /// Claims without evidence
    pub skipped: usize,
    /// Claims abandoned after a failure
    pub aborted: usize,
}

impl OutcomeCounts {
    /// Total number of claims seen
    pub fn total(&self) -> usize {
        self.recorded + self.skipped + self.aborted
    }
}

/// The aggregated verdict for one backstory
#[derive(Debug, Clone, PartialEq)]
pub struct StoryVerdict {
    /// Story-level label
    pub label: Label,

    /// Recorded rationales joined in claim order
    pub rationale: String,

    /// Whether any judgment crossed the contradiction threshold
    pub contradiction_found: bool,

    /// Claim outcome tally
    pub counts: OutcomeCounts,
}

impl StoryVerdict {
    /// Aggregate recorded judgments
    ///
    /// The contradiction flag is a sticky OR over all judgments, so the label
    /// does not depend on their order. Every rationale is kept regardless of
    /// verdict, empty ones included.
    pub fn from_judgments(judgments: &[ClaimJudgment], threshold: f64, separator: &str) -> Self {
        let contradiction_found = judgments.iter().any(|j| j.is_contradiction(threshold));
        let rationale = judgments
            .iter()
            .map(|j| j.rationale.as_str())
            .collect::<Vec<_>>()
            .join(separator);

        Self {
            label: Label::from_contradiction(contradiction_found),
            rationale,
            contradiction_found,
            counts: OutcomeCounts {
                recorded: judgments.len(),
                ..Default::default()
            },
        }
    }

    /// Aggregate a full list of claim outcomes
    pub fn from_outcomes(outcomes: &[ClaimOutcome], threshold: f64, separator: &str) -> Self {
        let judgments: Vec<ClaimJudgment> = outcomes
            .iter()
            .filter_map(ClaimOutcome::judgment)
            .cloned()
            .collect();

        let mut verdict = Self::from_judgments(&judgments, threshold, separator);
        for outcome in outcomes {
            match outcome {
                ClaimOutcome::Skipped => verdict.counts.skipped += 1,
                ClaimOutcome::Aborted(_) => verdict.counts.aborted += 1,
                ClaimOutcome::Recorded(_) => {}
            }
        }
        verdict
    }

    /// Predicted label as written to results (0 or 1)
    pub fn predicted_label(&self) -> i64 {
        self.label.as_int()
    }
}
