//! Helpers for reading model output

/// Strip a markdown code fence from a model reply
///
/// Models asked for JSON sometimes wrap it in a ```json block anyway. An
/// opening fence with no closing fence is tolerated.
///
/// # Examples
///
/// ```
/// use canon_llm::response::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => "",
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_untouched() {
        assert_eq!(strip_code_fence("{\"claims\": []}"), "{\"claims\": []}");
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(strip_code_fence("```json\n{\"x\": 2}"), "{\"x\": 2}");
    }

    #[test]
    fn test_bare_fence_is_empty() {
        assert_eq!(strip_code_fence("```"), "");
    }
}
