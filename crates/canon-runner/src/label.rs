//! Ground-truth label normalisation

/// A label as found in the dataset, before normalisation
#[derive(Debug, Clone, PartialEq)]
pub enum RawLabel {
    /// No label column, or an empty cell
    Missing,

    /// A numeric cell
    Number(f64),

    /// Any other text
    Text(String),
}

impl RawLabel {
    /// Classify a dataset cell
    ///
    /// Blank cells and `NaN` are missing; anything that parses as a number
    /// is numeric.
    pub fn from_field(field: Option<&str>) -> Self {
        let Some(field) = field.map(str::trim).filter(|f| !f.is_empty()) else {
            return RawLabel::Missing;
        };
        match field.parse::<f64>() {
            Ok(value) if value.is_nan() => RawLabel::Missing,
            Ok(value) => RawLabel::Number(value),
            Err(_) => RawLabel::Text(field.to_string()),
        }
    }
}

/// Map a raw label to 0 (contradiction) or 1 (consistent)
///
/// Numbers pass through truncated to an integer. Text mentioning
/// "contradict" or "fake" is 0; text mentioning "consistent" or "true" is 1.
/// Everything else, including a missing label, is 1.
///
/// # Examples
///
/// ```
/// use canon_runner::{normalize_label, RawLabel};
///
/// assert_eq!(normalize_label(&RawLabel::Text("Contradiction".into())), 0);
/// assert_eq!(normalize_label(&RawLabel::Text("CONSISTENT".into())), 1);
/// assert_eq!(normalize_label(&RawLabel::Number(0.0)), 0);
/// assert_eq!(normalize_label(&RawLabel::Missing), 1);
/// ```
pub fn normalize_label(raw: &RawLabel) -> i64 {
    match raw {
        RawLabel::Missing => 1,
        RawLabel::Number(value) => *value as i64,
        RawLabel::Text(text) => {
            let text = text.trim().to_lowercase();
            if text.contains("contradict") || text.contains("fake") {
                0
            } else {
                // "consistent", "true" and anything unrecognised
                1
            }
        }
    }
}
