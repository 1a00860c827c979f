//! Claim module - the atomic unit a backstory is decomposed into

use std::fmt;

/// Category assigned to a claim during decomposition
///
/// The category only changes retrieval behaviour for [`ClaimType::Temporal`]
/// claims (see the early-position boost in the evidence index). Unknown
/// categories coming back from the reasoning service collapse to
/// [`ClaimType::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimType {
    /// Ordering or timing of events ("before the war", "early in the story")
    Temporal,

    /// A tie between two characters
    Relationship,

    /// Where something happened or where someone lived
    Location,

    /// A personality or physical characteristic
    Trait,

    /// Anything else
    #[default]
    General,
}

impl ClaimType {
    /// Get the category name as the upper-case tag used in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Temporal => "TEMPORAL",
            ClaimType::Relationship => "RELATIONSHIP",
            ClaimType::Location => "LOCATION",
            ClaimType::Trait => "TRAIT",
            ClaimType::General => "GENERAL",
        }
    }

    /// Parse a category tag, case-insensitively
    ///
    /// Anything unrecognised maps to [`ClaimType::General`].
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_domain::ClaimType;
    ///
    /// assert_eq!(ClaimType::parse("temporal"), ClaimType::Temporal);
    /// assert_eq!(ClaimType::parse(" Trait "), ClaimType::Trait);
    /// assert_eq!(ClaimType::parse("EMOTION"), ClaimType::General);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TEMPORAL" => ClaimType::Temporal,
            "RELATIONSHIP" => ClaimType::Relationship,
            "LOCATION" => ClaimType::Location,
            "TRAIT" => ClaimType::Trait,
            _ => ClaimType::General,
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic, verifiable statement about a character
///
/// Claims are produced per backstory by the extractor and consumed once by
/// the verifier. They are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// The statement itself
    pub text: String,

    /// Category of the statement
    pub claim_type: ClaimType,

    /// Search queries used to find evidence, in the order they were produced
    pub queries: Vec<String>,
}

impl Claim {
    /// Create a new claim
    pub fn new(text: impl Into<String>, claim_type: ClaimType, queries: Vec<String>) -> Self {
        Self {
            text: text.into(),
            claim_type,
            queries,
        }
    }

    /// Whether this claim asks about the early part of the story
    ///
    /// True for temporal claims whose text mentions "early". The match is
    /// case-sensitive.
    pub fn is_early_temporal(&self) -> bool {
        self.claim_type == ClaimType::Temporal && self.text.contains("early")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_type_round_trip_tags() {
        for ty in [
            ClaimType::Temporal,
            ClaimType::Relationship,
            ClaimType::Location,
            ClaimType::Trait,
            ClaimType::General,
        ] {
            assert_eq!(ClaimType::parse(ty.as_str()), ty);
        }
    }

    #[test]
    fn test_claim_type_unknown_is_general() {
        assert_eq!(ClaimType::parse(""), ClaimType::General);
        assert_eq!(ClaimType::parse("CATEGORY"), ClaimType::General);
    }

    #[test]
    fn test_early_temporal() {
        let claim = Claim::new("He left early in the story", ClaimType::Temporal, vec![]);
        assert!(claim.is_early_temporal());

        let claim = Claim::new("He left early in the story", ClaimType::Location, vec![]);
        assert!(!claim.is_early_temporal());

        let claim = Claim::new("Early on he left", ClaimType::Temporal, vec![]);
        assert!(!claim.is_early_temporal());
    }
}
