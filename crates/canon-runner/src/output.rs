//! Results file writer

use crate::error::RunnerError;
use canon_domain::StoryRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ResultRow<'a> {
    id: &'a str,
    truth: i64,
    prediction: i64,
    rationale: &'a str,
}

impl<'a> From<&'a StoryRecord> for ResultRow<'a> {
    fn from(record: &'a StoryRecord) -> Self {
        Self {
            id: &record.id,
            truth: record.truth_label,
            prediction: record.predicted_label,
            rationale: record.rationale.as_deref().unwrap_or(""),
        }
    }
}

/// Write records as CSV with header `id,truth,prediction,rationale`
///
/// Records are written in the order given. A missing rationale is an
/// empty field.
pub fn write_results<W: Write>(writer: W, records: &[StoryRecord]) -> Result<(), RunnerError> {
    let mut csv = csv::Writer::from_writer(writer);
    let output_err = |e: csv::Error| RunnerError::Output(e.to_string());

    // Serialising the first row writes the header; an empty run needs it explicitly
    if records.is_empty() {
        csv.write_record(["id", "truth", "prediction", "rationale"])
            .map_err(output_err)?;
    }
    for record in records {
        csv.serialize(ResultRow::from(record)).map_err(output_err)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write records to a CSV file, replacing any existing file
pub fn write_results_file(path: impl AsRef<Path>, records: &[StoryRecord]) -> Result<(), RunnerError> {
    let file = std::fs::File::create(path.as_ref())
        .map_err(|e| RunnerError::Output(format!("{}: {}", path.as_ref().display(), e)))?;
    write_results(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_domain::RowOutcome;

    fn record(id: &str, truth: i64, predicted: i64, rationale: Option<&str>) -> StoryRecord {
        StoryRecord {
            id: id.to_string(),
            truth_label: truth,
            predicted_label: predicted,
            rationale: rationale.map(str::to_string),
            outcome: RowOutcome::Verified,
        }
    }

    fn render(records: &[StoryRecord]) -> String {
        let mut buf = Vec::new();
        write_results(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let out = render(&[
            record("7", 1, 0, Some("Joe was a blacksmith, not a sailor.")),
            record("8", 0, 0, None),
        ]);
        assert_eq!(
            out,
            "id,truth,prediction,rationale\n\
             7,1,0,\"Joe was a blacksmith, not a sailor.\"\n\
             8,0,0,\n"
        );
    }

    #[test]
    fn test_empty_still_has_header() {
        assert_eq!(render(&[]), "id,truth,prediction,rationale\n");
    }
}
