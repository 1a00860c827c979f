//! Story-level labels and result records

use std::fmt;

/// Story-level verdict
///
/// Encoded as 0 for a contradicted backstory and 1 for a consistent one,
/// which is also the encoding used by labelled datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// At least one claim is contradicted by the book
    Contradiction,

    /// No claim is contradicted by the book
    Consistent,
}

impl Label {
    /// Integer encoding (0 = contradiction, 1 = consistent)
    pub fn as_int(&self) -> i64 {
        match self {
            Label::Contradiction => 0,
            Label::Consistent => 1,
        }
    }

    /// Build a label from the sticky contradiction flag
    pub fn from_contradiction(contradiction_found: bool) -> Self {
        if contradiction_found {
            Label::Contradiction
        } else {
            Label::Consistent
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Contradiction => write!(f, "Contradiction (0)"),
            Label::Consistent => write!(f, "Consistent (1)"),
        }
    }
}

/// How a dataset row was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Claims were extracted and verified
    Verified,

    /// The row lacked a backstory or a book title
    Skipped,

    /// Processing failed and the fallback record was written
    Failed,
}

/// The result for one dataset row
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRecord {
    /// Row identifier
    pub id: String,

    /// Normalised ground-truth label
    pub truth_label: i64,

    /// Predicted label
    pub predicted_label: i64,

    /// Joined per-claim rationales, absent for skipped or failed rows
    pub rationale: Option<String>,

    /// How the row was handled
    pub outcome: RowOutcome,
}
