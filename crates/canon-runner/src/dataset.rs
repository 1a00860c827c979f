//! Labelled dataset loading

use crate::error::RunnerError;
use crate::label::RawLabel;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const BACKSTORY_COLUMNS: &[&str] = &["content", "backstory"];
const BOOK_COLUMNS: &[&str] = &["book_name", "Book"];
const CHARACTER_COLUMNS: &[&str] = &["char", "Character"];
const LABEL_COLUMNS: &[&str] = &["label", "Label", "verdict"];

/// Character name used when a row has none
pub const UNKNOWN_CHARACTER: &str = "Unknown";

/// One row of the labelled dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// Zero-based position in the file
    pub index: usize,

    /// Value of the `id` column, if present and non-blank
    pub id: Option<String>,

    /// Backstory text
    pub backstory: Option<String>,

    /// Title of the book the backstory belongs to
    pub book: Option<String>,

    /// Character the backstory describes
    pub character: Option<String>,

    /// Ground-truth label before normalisation
    pub label: RawLabel,
}

impl DatasetRow {
    /// Row identifier, falling back to the row position
    pub fn id(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.index.to_string())
    }

    /// Character name, or `"Unknown"`
    pub fn character(&self) -> &str {
        self.character.as_deref().unwrap_or(UNKNOWN_CHARACTER)
    }

    /// Backstory and book title, when both are present
    pub fn inputs(&self) -> Option<(&str, &str)> {
        Some((self.backstory.as_deref()?, self.book.as_deref()?))
    }

    fn from_fields(index: usize, fields: &HashMap<&str, &str>) -> Self {
        // The label takes the first column that exists, even if its cell is blank
        let label = LABEL_COLUMNS
            .iter()
            .find_map(|c| fields.get(c).copied())
            .map_or(RawLabel::Missing, |cell| RawLabel::from_field(Some(cell)));

        Self {
            index,
            id: first_present(fields, &["id"]),
            backstory: first_present(fields, BACKSTORY_COLUMNS),
            book: first_present(fields, BOOK_COLUMNS),
            character: first_present(fields, CHARACTER_COLUMNS),
            label,
        }
    }
}

/// First non-blank cell among the given columns
fn first_present(fields: &HashMap<&str, &str>, columns: &[&str]) -> Option<String> {
    columns
        .iter()
        .filter_map(|c| fields.get(c))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// A labelled dataset held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Load a CSV file with a header row
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Read CSV with a header row from any reader
    ///
    /// Rows may be ragged; cells missing at the end of a row are treated as
    /// blank.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RunnerError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let fields: HashMap<&str, &str> = headers.iter().zip(record.iter()).collect();
            rows.push(DatasetRow::from_fields(index, &fields));
        }
        Ok(Self { rows })
    }

    /// Build a dataset from rows already in memory
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    /// All rows in file order
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `limit` rows
    pub fn head(&self, limit: usize) -> &[DatasetRow] {
        &self.rows[..limit.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_primary_columns() {
        let dataset = load(
            "id,book_name,char,content,label\n\
             42,Great Expectations,Pip,Pip grew up in the marshes,consistent\n",
        );
        let row = &dataset.rows()[0];
        assert_eq!(row.id(), "42");
        assert_eq!(row.inputs(), Some(("Pip grew up in the marshes", "Great Expectations")));
        assert_eq!(row.character(), "Pip");
        assert_eq!(row.label, RawLabel::Text("consistent".to_string()));
    }

    #[test]
    fn test_alternative_columns() {
        let dataset = load(
            "Book,Character,backstory,verdict\n\
             Moby Dick,Ishmael,Went to sea young,0\n",
        );
        let row = &dataset.rows()[0];
        assert_eq!(row.inputs(), Some(("Went to sea young", "Moby Dick")));
        assert_eq!(row.character(), "Ishmael");
        assert_eq!(row.label, RawLabel::Number(0.0));
    }

    #[test]
    fn test_defaults_for_missing_cells() {
        let dataset = load(
            "book_name,content\n\
             Moby Dick,\n\
             ,Some story\n",
        );
        assert_eq!(dataset.len(), 2);

        let first = &dataset.rows()[0];
        assert_eq!(first.id(), "0");
        assert_eq!(first.character(), "Unknown");
        assert_eq!(first.label, RawLabel::Missing);
        assert!(first.inputs().is_none());

        assert_eq!(dataset.rows()[1].id(), "1");
        assert!(dataset.rows()[1].inputs().is_none());
    }

    #[test]
    fn test_blank_primary_falls_back() {
        let dataset = load("content,backstory,book_name\n,Fallback story,Emma\n");
        assert_eq!(dataset.rows()[0].backstory.as_deref(), Some("Fallback story"));
    }

    #[test]
    fn test_label_column_precedence() {
        let dataset = load("label,verdict\n,contradict\n");
        // "label" exists, so "verdict" is never consulted
        assert_eq!(dataset.rows()[0].label, RawLabel::Missing);
    }

    #[test]
    fn test_ragged_rows_and_quotes() {
        let dataset = load("id,content,book_name\n1,\"He said, \"\"hello\"\"\"\n");
        let row = &dataset.rows()[0];
        assert_eq!(row.backstory.as_deref(), Some("He said, \"hello\""));
        assert!(row.book.is_none());
    }

    #[test]
    fn test_head() {
        let dataset = load("id\n1\n2\n3\n");
        assert_eq!(dataset.head(2).len(), 2);
        assert_eq!(dataset.head(10).len(), 3);
    }
}
