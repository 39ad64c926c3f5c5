use tracing::warn;

use crate::domain::error::{AppError, Result};
use crate::domain::generation::RejectedCandidate;
use crate::domain::question::Question;
use crate::infrastructure::response::extract_json_payload;

/// Result of folding raw backend output into validated questions.
/// An empty `accepted` list is a valid outcome, not an error.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub accepted: Vec<Question>,
    pub rejected: Vec<RejectedCandidate>,
}

pub struct ResponseValidator;

impl ResponseValidator {
    /// Parses raw backend text and validates each candidate in order.
    ///
    /// Unparseable or non-array output fails the whole call: without a
    /// valid top-level array no items can be recovered. A candidate that
    /// fails schema validation is recorded with its 1-based position and
    /// skipped; one bad item never aborts the batch.
    pub fn validate(raw: &str) -> Result<BatchOutcome> {
        let payload = extract_json_payload(raw);

        let parsed: serde_json::Value = serde_json::from_str(&payload)
            .map_err(|e| AppError::malformed_response(format!("invalid JSON: {}", e), raw))?;

        let candidates = parsed.as_array().ok_or_else(|| {
            AppError::malformed_response("response must be a JSON array", raw)
        })?;

        let mut outcome = BatchOutcome::default();
        for (idx, candidate) in candidates.iter().enumerate() {
            let position = idx + 1;
            match Question::from_value(candidate.clone()) {
                Ok(question) => outcome.accepted.push(question),
                Err(err) => {
                    let reason = err.to_string();
                    warn!(position, %reason, "question failed validation, skipping");
                    outcome.rejected.push(RejectedCandidate { position, reason });
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mcq(content: &str) -> serde_json::Value {
        json!({
            "content": content,
            "type": "multiple_choice",
            "options": {"options": [
                {"id": "a", "text": "yes"},
                {"id": "b", "text": "no"}
            ]},
            "solution": {"correct_option_id": "a"}
        })
    }

    #[test]
    fn test_all_valid_candidates_accepted_in_order() {
        let raw = json!([mcq("First question?"), mcq("Second question?")]).to_string();
        let outcome = ResponseValidator::validate(&raw).unwrap();
        assert_eq!(outcome.accepted.len(), 2);
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.accepted[0].content, "First question?");
        assert_eq!(outcome.accepted[1].content, "Second question?");
    }

    #[test]
    fn test_invalid_middle_item_is_skipped_not_fatal() {
        let bad = json!({
            "content": "Name the capital of France.",
            "type": "text_input",
            "options": {},
            "solution": {}
        });
        let raw = json!([mcq("First question?"), bad, mcq("Third question?")]).to_string();
        let outcome = ResponseValidator::validate(&raw).unwrap();
        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.accepted[0].content, "First question?");
        assert_eq!(outcome.accepted[1].content, "Third question?");
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].position, 2);
        assert!(outcome.rejected[0].reason.contains("exact_match"));
    }

    #[test]
    fn test_invalid_json_is_fatal_with_preview() {
        let err = ResponseValidator::validate("definitely not json").unwrap_err();
        match err {
            AppError::MalformedResponse { preview, .. } => {
                assert_eq!(preview, "definitely not json");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_array_top_level_is_fatal() {
        let raw = json!({"questions": []}).to_string();
        let err = ResponseValidator::validate(&raw).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[test]
    fn test_empty_array_is_a_valid_outcome() {
        let outcome = ResponseValidator::validate("[]").unwrap();
        assert!(outcome.accepted.is_empty());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let raw = format!("```json\n{}\n```", json!([mcq("Fenced question?")]));
        let outcome = ResponseValidator::validate(&raw).unwrap();
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn test_all_invalid_yields_empty_accepted_list() {
        let raw = json!([{"content": "short"}, {"content": "x"}]).to_string();
        let outcome = ResponseValidator::validate(&raw).unwrap();
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].position, 1);
        assert_eq!(outcome.rejected[1].position, 2);
    }
}
