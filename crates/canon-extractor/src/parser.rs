//! Parse LLM output into claims

use crate::error::ExtractorError;
use canon_domain::{Claim, ClaimType};
use canon_llm::response::strip_code_fence;
use serde_json::Value;
use tracing::warn;

/// Parse a decomposition response into claims
///
/// The response must be a JSON object; its `claims` array may be missing,
/// which yields no claims. Entries without text are dropped. A claim with
/// no usable queries searches with its own text.
pub fn parse_llm_response(
    response: &str,
    max_claims: usize,
    max_queries: usize,
) -> Result<Vec<Claim>, ExtractorError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let claims_array = match obj.get("claims") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ExtractorError::InvalidFormat(
                "'claims' is not an array".to_string(),
            ))
        }
    };

    let mut claims = Vec::new();
    for (idx, claim_json) in claims_array.iter().enumerate() {
        match parse_claim_json(claim_json, max_queries) {
            Ok(claim) => claims.push(claim),
            Err(e) => warn!("Failed to parse claim {}: {}", idx, e),
        }
    }

    if claims.len() > max_claims {
        warn!("Model returned {} claims, keeping the first {}", claims.len(), max_claims);
        claims.truncate(max_claims);
    }

    Ok(claims)
}

fn parse_claim_json(json: &Value, max_queries: usize) -> Result<Claim, String> {
    // Bare strings are accepted as general claims
    if let Some(text) = json.as_str() {
        let text = text.trim();
        if text.is_empty() {
            return Err("Empty claim text".to_string());
        }
        return Ok(Claim::new(text, ClaimType::General, vec![text.to_string()]));
    }

    let obj = json
        .as_object()
        .ok_or_else(|| "Claim is not a JSON object".to_string())?;

    let text = obj
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "Missing or invalid 'text'".to_string())?
        .to_string();

    let claim_type = obj
        .get("type")
        .and_then(|v| v.as_str())
        .map(ClaimType::parse)
        .unwrap_or_default();

    let mut queries: Vec<String> = match obj.get("queries") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|q| q.as_str())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(q)) if !q.trim().is_empty() => vec![q.trim().to_string()],
        _ => Vec::new(),
    };
    queries.truncate(max_queries);
    if queries.is_empty() {
        queries.push(text.clone());
    }

    Ok(Claim::new(text, claim_type, queries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(response: &str) -> Result<Vec<Claim>, ExtractorError> {
        parse_llm_response(response, 5, 3)
    }

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "claims": [
                {
                    "text": "Ishmael went to sea as a young man",
                    "type": "TEMPORAL",
                    "queries": ["Ishmael sea", "young Ishmael sailing", "Ishmael never sailed"]
                }
            ]
        }"#;

        let claims = parse(response).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "Ishmael went to sea as a young man");
        assert_eq!(claims[0].claim_type, ClaimType::Temporal);
        assert_eq!(claims[0].queries.len(), 3);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"claims\": [{\"text\": \"Ahab lost a leg\", \"type\": \"trait\", \"queries\": [\"Ahab leg\"]}]}\n```";

        let claims = parse(response).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim_type, ClaimType::Trait);
    }

    #[test]
    fn test_missing_claims_key_is_empty() {
        assert!(parse(r#"{"result": "nothing"}"#).unwrap().is_empty());
        assert!(parse(r#"{"claims": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(parse("[]"), Err(ExtractorError::InvalidFormat(_))));
        assert!(matches!(parse(r#"{"claims": "none"}"#), Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse("This is not JSON"), Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let claims = parse(r#"{"claims": [{"text": "Queequeg was a harpooner"}]}"#).unwrap();
        assert_eq!(claims[0].claim_type, ClaimType::General);
        assert_eq!(claims[0].queries, vec!["Queequeg was a harpooner"]);
    }

    #[test]
    fn test_unknown_type_is_general() {
        let claims = parse(r#"{"claims": [{"text": "x", "type": "MOOD", "queries": ["q"]}]}"#).unwrap();
        assert_eq!(claims[0].claim_type, ClaimType::General);
    }

    #[test]
    fn test_skips_claims_without_text() {
        let response = r#"{"claims": [
            {"type": "TRAIT", "queries": ["q"]},
            {"text": "  ", "queries": ["q"]},
            42,
            "Starbuck was first mate",
            {"text": "Stubb was second mate", "queries": ["Stubb"]}
        ]}"#;

        let claims = parse(response).unwrap();
        let texts: Vec<_> = claims.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Starbuck was first mate", "Stubb was second mate"]);
    }

    #[test]
    fn test_limits_claims_and_queries() {
        let items: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"text": "claim {}", "queries": ["a", "b", "c", "d", ""]}}"#, i))
            .collect();
        let response = format!(r#"{{"claims": [{}]}}"#, items.join(","));

        let claims = parse(&response).unwrap();
        assert_eq!(claims.len(), 5);
        assert_eq!(claims[4].text, "claim 4");
        assert!(claims.iter().all(|c| c.queries == vec!["a", "b", "c"]));
    }

    #[test]
    fn test_unterminated_fence() {
        assert!(parse("```json\n{\"claims\": []}").unwrap().is_empty());
        assert!(matches!(parse("```"), Err(ExtractorError::JsonParse(_))));
    }
}
