//! Parse judgment responses

use crate::error::VerifierError;
use canon_domain::{ClaimJudgment, Verdict};
use canon_llm::response::strip_code_fence;
use serde_json::{Map, Value};

/// Parse a judgment response
///
/// Missing fields default to NEUTRAL, 0.0 and an empty rationale. Fields
/// that are present but unusable (a non-string verdict, a confidence that
/// is not a number) reject the whole response.
pub fn parse_judgment(response: &str) -> Result<ClaimJudgment, VerifierError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))
        .map_err(|e| VerifierError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| VerifierError::InvalidFormat("Expected JSON object".to_string()))?;

    let verdict = match obj.get("verdict") {
        None => Verdict::Neutral,
        Some(Value::String(s)) => Verdict::parse(s),
        Some(other) => {
            return Err(VerifierError::InvalidFormat(format!(
                "'verdict' is not a string: {}",
                other
            )))
        }
    };

    let confidence = parse_confidence(obj)?;

    let rationale = match obj.get("rationale") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(ClaimJudgment::new(verdict, confidence, rationale))
}

fn parse_confidence(obj: &Map<String, Value>) -> Result<f64, VerifierError> {
    match obj.get("confidence") {
        None => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| VerifierError::InvalidFormat(format!("Bad confidence: {}", n))),
        // Models sometimes quote numbers
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| VerifierError::InvalidFormat(format!("Bad confidence: {:?}", s))),
        Some(other) => Err(VerifierError::InvalidFormat(format!(
            "'confidence' is not a number: {}",
            other
        ))),
    }
}
