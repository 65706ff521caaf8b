use serde_json::Value;

// The response comes from a third party and may be missing any level,
// so every accessor answers "nothing here" instead of failing.

fn candidates(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("candidates")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn parts(candidate: &Value) -> impl Iterator<Item = &Value> {
    candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn part_text(part: &Value) -> Option<&str> {
    part.get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// First non-empty text part across all candidates, trimmed.
///
/// Returns an empty string when the response carries no usable text.
pub fn extract_text(response: &Value) -> String {
    candidates(response)
        .flat_map(parts)
        .find_map(part_text)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Message from an error envelope: `error.message`, then top-level `message`.
pub fn extract_error_message(response: Option<&Value>) -> String {
    let Some(response) = response else {
        return String::new();
    };

    response
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .or_else(|| response.get("message").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_candidates_yields_empty() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({ "candidates": [] })), "");
        assert_eq!(extract_text(&Value::Null), "");
    }

    #[test]
    fn test_candidates_without_parts_yield_empty() {
        let response = json!({
            "candidates": [
                {},
                { "content": {} },
                { "content": { "parts": [] } },
                { "content": { "parts": "not a list" } }
            ]
        });
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn test_whitespace_parts_yield_empty() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "   " }, { "text": "\n\t" } ] } }
            ]
        });
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn test_first_text_wins() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  Pierwsza odpowiedź \n" } ] } },
                { "content": { "parts": [ { "text": "Druga odpowiedź" } ] } }
            ]
        });
        assert_eq!(extract_text(&response), "Pierwsza odpowiedź");
    }

    #[test]
    fn test_skips_malformed_branches() {
        let response = json!({
            "candidates": [
                "garbage",
                { "content": { "parts": [ { "inlineData": {} }, { "text": 42 }, { "text": "" } ] } },
                { "content": { "parts": [ null, { "text": "Zupa pomidorowa" } ] } }
            ]
        });
        assert_eq!(extract_text(&response), "Zupa pomidorowa");
    }

    #[test]
    fn test_candidates_not_a_list() {
        assert_eq!(extract_text(&json!({ "candidates": { "text": "x" } })), "");
    }

    #[test]
    fn test_error_message_prefers_nested() {
        let body = json!({ "error": { "message": "quota exceeded" }, "message": "outer" });
        assert_eq!(extract_error_message(Some(&body)), "quota exceeded");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(extract_error_message(Some(&json!({ "message": "outer" }))), "outer");
        assert_eq!(extract_error_message(Some(&json!({ "error": { "message": 5 } }))), "");
        assert_eq!(extract_error_message(None), "");
    }
}
