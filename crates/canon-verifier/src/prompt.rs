//! Consistency-check prompt

use canon_domain::{Claim, Evidence};

/// System message sent with every judgment request
pub const SYSTEM_PROMPT: &str = "You are a strict fact-checker. Output JSON only.";

const OUTPUT_FORMAT: &str = r#"Return a JSON object with this exact format:
{
    "verdict": "SUPPORT" or "CONTRADICT" or "NEUTRAL",
    "confidence": 0.0 to 1.0,
    "rationale": "One sentence explanation"
}"#;

/// Format evidence as one `- text (Pos: p)` line per passage
pub fn format_evidence(evidence: &[Evidence]) -> String {
    evidence
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the judgment prompt for one claim
pub fn build_check_prompt(claim: &Claim, evidence: &[Evidence]) -> String {
    format!(
        "Task: Check Consistency.\nClaim: \"{}\"\nEvidence from Book:\n{}\n\n\
         Does the evidence IMPOSSIBLY CONTRADICT the claim?\n\n{}",
        claim.text,
        format_evidence(evidence),
        OUTPUT_FORMAT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_domain::ClaimType;

    fn evidence(text: &str, position: f64) -> Evidence {
        Evidence {
            chunk_text: text.to_string(),
            score: 0.9,
            relative_position: position,
            book_name: "Moby Dick".to_string(),
        }
    }

    #[test]
    fn test_evidence_lines() {
        let lines = format_evidence(&[evidence("Call me Ishmael.", 0.0), evidence("Ahab's leg", 0.42)]);
        assert_eq!(lines, "- Call me Ishmael. (Pos: 0.0)\n- Ahab's leg (Pos: 0.42)");
    }

    #[test]
    fn test_prompt_layout() {
        let claim = Claim::new("Ishmael was a schoolteacher", ClaimType::Trait, vec![]);
        let prompt = build_check_prompt(&claim, &[evidence("Call me Ishmael.", 0.0)]);

        assert!(prompt.starts_with("Task: Check Consistency.\nClaim: \"Ishmael was a schoolteacher\"\n"));
        assert!(prompt.contains("Evidence from Book:\n- Call me Ishmael. (Pos: 0.0)\n"));
        assert!(prompt.contains("IMPOSSIBLY CONTRADICT"));
        assert!(prompt.contains("\"verdict\": \"SUPPORT\" or \"CONTRADICT\" or \"NEUTRAL\""));
    }
}
