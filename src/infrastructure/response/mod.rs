use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

/// Strips common model artifacts from raw generation output so the JSON
/// payload underneath can be parsed: reasoning tags some models emit, and
/// Markdown code fences around the JSON array.
///
/// Cleanup never invents structure; if the remainder is still not JSON,
/// parsing fails downstream with the original raw text in the error
/// preview.
pub fn extract_json_payload(raw: &str) -> String {
    let cleaned = THINK_TAG_PATTERN.replace_all(raw, "");
    strip_code_fence(cleaned.trim())
}

fn strip_code_fence(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}
