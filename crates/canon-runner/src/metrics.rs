//! Classification metrics for a finished run

use canon_domain::Label;
use std::fmt;
use thiserror::Error;

/// Why a report could not be produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// No labels to score
    #[error("No labels to score")]
    Empty,

    /// Truth and prediction lists differ in length
    #[error("Length mismatch: {truths} truths, {predictions} predictions")]
    LengthMismatch {
        /// Number of truth labels
        truths: usize,
        /// Number of predicted labels
        predictions: usize,
    },

    /// A label outside {0, 1}
    #[error("Unexpected label {0}; expected 0 or 1")]
    UnexpectedLabel(i64),
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassScores {
    /// Share of predictions of this class that were right
    pub precision: f64,
    /// Share of this class that was found
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Number of truth labels of this class
    pub support: usize,
}

impl ClassScores {
    fn from_counts(true_pos: usize, predicted: usize, support: usize) -> Self {
        let precision = ratio(true_pos, predicted);
        let recall = ratio(true_pos, support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            precision,
            recall,
            f1,
            support,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Accuracy plus per-class scores for the two story labels
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    /// Fraction of rows predicted correctly
    pub accuracy: f64,
    /// Scores for label 0
    pub contradiction: ClassScores,
    /// Scores for label 1
    pub consistent: ClassScores,
}

impl ClassificationReport {
    /// Score predictions against truths
    ///
    /// Zero denominators give 0 rather than an error.
    pub fn compute(truths: &[i64], predictions: &[i64]) -> Result<Self, MetricsError> {
        if truths.len() != predictions.len() {
            return Err(MetricsError::LengthMismatch {
                truths: truths.len(),
                predictions: predictions.len(),
            });
        }
        if truths.is_empty() {
            return Err(MetricsError::Empty);
        }
        if let Some(bad) = truths.iter().chain(predictions).find(|l| !matches!(**l, 0 | 1)) {
            return Err(MetricsError::UnexpectedLabel(*bad));
        }

        let pairs = || truths.iter().zip(predictions);
        let correct = pairs().filter(|(t, p)| t == p).count();

        let scores = |class: i64| {
            let true_pos = pairs().filter(|(t, p)| **t == class && **p == class).count();
            let predicted = predictions.iter().filter(|p| **p == class).count();
            let support = truths.iter().filter(|t| **t == class).count();
            ClassScores::from_counts(true_pos, predicted, support)
        };

        Ok(Self {
            accuracy: ratio(correct, truths.len()),
            contradiction: scores(Label::Contradiction.as_int()),
            consistent: scores(Label::Consistent.as_int()),
        })
    }

    /// Total number of scored rows
    pub fn support(&self) -> usize {
        self.contradiction.support + self.consistent.support
    }

    /// Unweighted mean of the per-class scores
    pub fn macro_avg(&self) -> ClassScores {
        let (a, b) = (&self.contradiction, &self.consistent);
        ClassScores {
            precision: (a.precision + b.precision) / 2.0,
            recall: (a.recall + b.recall) / 2.0,
            f1: (a.f1 + b.f1) / 2.0,
            support: self.support(),
        }
    }

    /// Support-weighted mean of the per-class scores
    pub fn weighted_avg(&self) -> ClassScores {
        let (a, b) = (&self.contradiction, &self.consistent);
        let total = self.support() as f64;
        let (wa, wb) = (a.support as f64 / total, b.support as f64 / total);
        ClassScores {
            precision: a.precision * wa + b.precision * wb,
            recall: a.recall * wa + b.recall * wb,
            f1: a.f1 * wa + b.f1 * wb,
            support: self.support(),
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, s: &ClassScores) -> fmt::Result {
    writeln!(
        f,
        "{:>20} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        name, s.precision, s.recall, s.f1, s.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f)?;
        writeln!(f, "{:>20} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        write_row(f, &Label::Contradiction.to_string(), &self.contradiction)?;
        write_row(f, &Label::Consistent.to_string(), &self.consistent)?;
        writeln!(f)?;
        write_row(f, "macro avg", &self.macro_avg())?;
        write_row(f, "weighted avg", &self.weighted_avg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_report_values() {
        let truths = [0, 0, 1, 1, 1];
        let preds = [0, 1, 1, 1, 0];
        let report = ClassificationReport::compute(&truths, &preds).unwrap();

        assert!(close(report.accuracy, 0.6));
        assert!(close(report.contradiction.precision, 0.5));
        assert!(close(report.contradiction.recall, 0.5));
        assert!(close(report.consistent.precision, 2.0 / 3.0));
        assert!(close(report.consistent.recall, 2.0 / 3.0));
        assert_eq!(report.contradiction.support, 2);
        assert_eq!(report.consistent.support, 3);
        assert!(close(report.weighted_avg().recall, 0.6));
    }

    #[test]
    fn test_zero_division_is_zero() {
        let report = ClassificationReport::compute(&[1, 1], &[1, 1]).unwrap();
        assert_eq!(report.contradiction, ClassScores::default());
        assert!(close(report.consistent.f1, 1.0));
        assert!(close(report.macro_avg().f1, 0.5));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(ClassificationReport::compute(&[], &[]), Err(MetricsError::Empty));
        assert!(matches!(
            ClassificationReport::compute(&[1], &[1, 0]),
            Err(MetricsError::LengthMismatch { .. })
        ));
        assert_eq!(
            ClassificationReport::compute(&[2], &[1]),
            Err(MetricsError::UnexpectedLabel(2))
        );
    }

    #[test]
    fn test_display() {
        let report = ClassificationReport::compute(&[0, 1], &[0, 1]).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Accuracy: 1.0000"));
        assert!(text.contains("Contradiction (0)"));
        assert!(text.contains("weighted avg"));
    }
}
