//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use canon_domain::{Claim, RowOutcome, StoryRecord};
use canon_runner::{ClassScores, ClassificationReport, ValidationRun};
use canon_verifier::StoryVerdict;
use colored::*;
use std::collections::BTreeMap;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const RATIONALE_PREVIEW: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted claims.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&claims_json(claims))?),
            OutputFormat::Table => Ok(self.format_claims_table(claims)),
        }
    }

    fn format_claims_table(&self, claims: &[Claim]) -> String {
        if claims.is_empty() {
            return self.colorize("No claims extracted.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Type", "Claim", "Queries"]);
        for (n, claim) in claims.iter().enumerate() {
            builder.push_record([
                (n + 1).to_string(),
                claim.claim_type.to_string(),
                claim.text.clone(),
                claim.queries.join("; "),
            ]);
        }
        self.render(builder)
    }

    /// Format the verdict for one backstory, with its claims.
    pub fn format_check(&self, claims: &[Claim], verdict: &StoryVerdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "claims": claims_json(claims),
                    "label": verdict.predicted_label(),
                    "verdict": verdict.label.to_string(),
                    "contradiction_found": verdict.contradiction_found,
                    "rationale": verdict.rationale,
                    "claims_judged": verdict.counts.recorded,
                    "claims_skipped": verdict.counts.skipped,
                    "claims_aborted": verdict.counts.aborted,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let label = format!("Verdict: {}", verdict.label);
                let label = if verdict.contradiction_found {
                    self.colorize(&label, "red")
                } else {
                    self.colorize(&label, "green")
                };
                let mut out = vec![self.format_claims_table(claims), label];
                out.push(format!(
                    "Claims judged: {}, without evidence: {}, failed: {}",
                    verdict.counts.recorded, verdict.counts.skipped, verdict.counts.aborted
                ));
                if !verdict.rationale.is_empty() {
                    out.push(format!("Rationale: {}", verdict.rationale));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format per-book chunk counts after indexing.
    pub fn format_index(&self, counts: &BTreeMap<String, usize>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(counts)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Book", "Chunks"]);
                for (book, count) in counts {
                    builder.push_record([book.clone(), count.to_string()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a finished validation run.
    ///
    /// `report` is `None` when the run produced no scorable rows.
    pub fn format_run(
        &self,
        run: &ValidationRun,
        report: Option<&ClassificationReport>,
        output: &Path,
    ) -> Result<String> {
        let verified = run.count(RowOutcome::Verified);
        let skipped = run.count(RowOutcome::Skipped);
        let failed = run.count(RowOutcome::Failed);

        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "output": output.display().to_string(),
                    "rows": run.records().len(),
                    "verified": verified,
                    "skipped": skipped,
                    "failed": failed,
                    "report": report.map(report_json),
                    "records": run.records().iter().map(record_json).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut out = vec![self.format_records_table(run.records())];
                out.push(format!(
                    "{} rows: {} verified, {} skipped, {} failed",
                    run.records().len(),
                    verified,
                    skipped,
                    failed
                ));
                match report {
                    Some(report) => {
                        out.push(self.info(&format!("Accuracy: {:.2}%", report.accuracy * 100.0)));
                        out.push(report.to_string());
                    }
                    None => out.push(self.warning("No rows to score")),
                }
                out.push(self.success(&format!("Results saved to {}", output.display())));
                Ok(out.join("\n"))
            }
        }
    }

    fn format_records_table(&self, records: &[StoryRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No rows processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Truth", "Prediction", "Outcome", "Rationale"]);
        for record in records {
            let hit = record.truth_label == record.predicted_label;
            let prediction = record.predicted_label.to_string();
            builder.push_record([
                record.id.clone(),
                record.truth_label.to_string(),
                if hit {
                    self.colorize(&prediction, "green")
                } else {
                    self.colorize(&prediction, "red")
                },
                outcome_name(record.outcome).to_string(),
                preview(record.rationale.as_deref().unwrap_or("")),
            ]);
        }
        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_name(outcome: RowOutcome) -> &'static str {
    match outcome {
        RowOutcome::Verified => "verified",
        RowOutcome::Skipped => "skipped",
        RowOutcome::Failed => "failed",
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= RATIONALE_PREVIEW {
        return text.to_string();
    }
    let cut: String = text.chars().take(RATIONALE_PREVIEW - 1).collect();
    format!("{}…", cut)
}

fn claims_json(claims: &[Claim]) -> Vec<serde_json::Value> {
    claims
        .iter()
        .map(|c| {
            serde_json::json!({
                "text": c.text,
                "type": c.claim_type.as_str(),
                "queries": c.queries,
            })
        })
        .collect()
}

fn scores_json(scores: &ClassScores) -> serde_json::Value {
    serde_json::json!({
        "precision": scores.precision,
        "recall": scores.recall,
        "f1": scores.f1,
        "support": scores.support,
    })
}

fn report_json(report: &ClassificationReport) -> serde_json::Value {
    serde_json::json!({
        "accuracy": report.accuracy,
        "contradiction": scores_json(&report.contradiction),
        "consistent": scores_json(&report.consistent),
        "macro_avg": scores_json(&report.macro_avg()),
        "weighted_avg": scores_json(&report.weighted_avg()),
    })
}

fn record_json(record: &StoryRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "truth": record.truth_label,
        "prediction": record.predicted_label,
        "outcome": outcome_name(record.outcome),
        "rationale": record.rationale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_domain::{ClaimType, Label};
    use canon_verifier::OutcomeCounts;

    fn claims() -> Vec<Claim> {
        vec![Claim::new(
            "Pip was raised by his sister",
            ClaimType::Relationship,
            vec!["Pip sister".to_string()],
        )]
    }

    fn verdict(contradiction_found: bool) -> StoryVerdict {
        StoryVerdict {
            label: Label::from_contradiction(contradiction_found),
            rationale: "Mrs Joe raised him by hand.".to_string(),
            contradiction_found,
            counts: OutcomeCounts {
                recorded: 1,
                skipped: 0,
                aborted: 0,
            },
        }
    }

    #[test]
    fn test_claims_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_claims(&claims()).unwrap();
        assert!(output.contains("Type"));
        assert!(output.contains("Pip was raised by his sister"));
    }

    #[test]
    fn test_empty_claims() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_claims(&[]).unwrap();
        assert!(output.contains("No claims extracted"));
    }

    #[test]
    fn test_check_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_check(&claims(), &verdict(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["label"], 1);
        assert_eq!(value["claims"][0]["type"], "RELATIONSHIP");
    }

    #[test]
    fn test_check_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_check(&claims(), &verdict(true)).unwrap();
        assert!(output.contains("Rationale: Mrs Joe raised him by hand."));
    }

    #[test]
    fn test_long_rationale_is_shortened() {
        let long = "x".repeat(200);
        let short = preview(&long);
        assert_eq!(short.chars().count(), RATIONALE_PREVIEW);
        assert!(short.ends_with('…'));
        assert_eq!(preview("brief"), "brief");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
