//! Per-claim judgments from the reasoning service

/// Verdict on whether the evidence supports a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    /// The evidence backs the claim
    Support,

    /// The evidence rules the claim out
    Contradict,

    /// The evidence says nothing decisive
    #[default]
    Neutral,
}

impl Verdict {
    /// Get the verdict as the upper-case tag used in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Support => "SUPPORT",
            Verdict::Contradict => "CONTRADICT",
            Verdict::Neutral => "NEUTRAL",
        }
    }

    /// Parse a verdict tag, case-insensitively; anything else is neutral
    ///
    /// Surrounding whitespace is ignored as a deliberate leniency over exact tag matching.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "SUPPORT" => Verdict::Support,
            "CONTRADICT" => Verdict::Contradict,
            _ => Verdict::Neutral,
        }
    }
}

/// The reasoning service's judgment on one claim
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimJudgment {
    /// Verdict
    pub verdict: Verdict,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// One-sentence explanation, possibly empty
    pub rationale: String,
}

impl ClaimJudgment {
    /// Create a judgment, clamping confidence into [0, 1]
    pub fn new(verdict: Verdict, confidence: f64, rationale: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        Self {
            verdict,
            confidence,
            rationale: rationale.into(),
        }
    }

    /// Whether this judgment counts as a contradiction at the given threshold
    ///
    /// The threshold is inclusive.
    pub fn is_contradiction(&self, threshold: f64) -> bool {
        self.verdict == Verdict::Contradict && self.confidence >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parse_case_insensitive() {
        assert_eq!(Verdict::parse("contradict"), Verdict::Contradict);
        assert_eq!(Verdict::parse("Support"), Verdict::Support);
        assert_eq!(Verdict::parse("NEUTRAL"), Verdict::Neutral);
        assert_eq!(Verdict::parse("maybe"), Verdict::Neutral);
        assert_eq!(Verdict::parse(" contradict\n"), Verdict::Contradict);
    }

    #[test]
    fn test_contradiction_threshold_is_inclusive() {
        let judgment = ClaimJudgment::new(Verdict::Contradict, 0.4, "");
        assert!(judgment.is_contradiction(0.4));
        assert!(!judgment.is_contradiction(0.41));
    }

    #[test]
    fn test_support_is_never_contradiction() {
        let judgment = ClaimJudgment::new(Verdict::Support, 1.0, "");
        assert!(!judgment.is_contradiction(0.0));
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(ClaimJudgment::new(Verdict::Neutral, 1.7, "").confidence, 1.0);
        assert_eq!(ClaimJudgment::new(Verdict::Neutral, -0.2, "").confidence, 0.0);
        assert_eq!(ClaimJudgment::new(Verdict::Neutral, f64::NAN, "").confidence, 0.0);
    }
}
