//! Evidence returned by a book-scoped search

use std::fmt;

/// A passage retrieved for a claim
///
/// Retrieval returns these ordered by descending `score`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    /// Text of the chunk the passage came from
    pub chunk_text: String,

    /// Final ranking score (rerank score plus any boost)
    pub score: f32,

    /// Relative position of the chunk inside its book
    pub relative_position: f64,

    /// Book the chunk belongs to
    pub book_name: String,
}

impl fmt::Display for Evidence {
    /// Formats one line of the evidence list shown to the reasoning service
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} (Pos: {:?})", self.chunk_text, self.relative_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_line_format() {
        let evidence = Evidence {
            chunk_text: "The ship sailed at dawn".to_string(),
            score: 0.7,
            relative_position: 0.25,
            book_name: "The Voyage".to_string(),
        };
        assert_eq!(evidence.to_string(), "- The ship sailed at dawn (Pos: 0.25)");
    }

    #[test]
    fn test_evidence_line_keeps_decimal_point() {
        let evidence = Evidence {
            chunk_text: "Opening lines".to_string(),
            score: 1.2,
            relative_position: 0.0,
            book_name: "The Voyage".to_string(),
        };
        assert_eq!(evidence.to_string(), "- Opening lines (Pos: 0.0)");
    }
}
