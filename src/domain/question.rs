use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{AppError, Result};

pub const MIN_CONTENT_CHARS: usize = 10;
pub const MIN_CHOICE_OPTIONS: usize = 2;
pub const MIN_POINTS: i64 = 1;
pub const MAX_POINTS: i64 = 10;

/// Question types matching the downstream database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    McqMulti,
    TextInput,
    Boolean,
    ReorderSteps,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::McqMulti => "mcq_multi",
            QuestionType::TextInput => "text_input",
            QuestionType::Boolean => "boolean",
            QuestionType::ReorderSteps => "reorder_steps",
        }
    }

    fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "mcq_multi" => Ok(QuestionType::McqMulti),
            "text_input" => Ok(QuestionType::TextInput),
            "boolean" => Ok(QuestionType::Boolean),
            "reorder_steps" => Ok(QuestionType::ReorderSteps),
            other => Err(AppError::Validation(format!(
                "unknown question type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            other => Err(AppError::Parse(format!(
                "invalid difficulty level: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single option for multiple choice questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceSolution {
    pub correct_option_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInputSolution {
    pub exact_match: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BooleanSolution {
    pub correct_value: bool,
}

/// Type-specific payload of a question. Each variant carries its own
/// options/solution shape, so a structurally inconsistent combination
/// cannot be represented.
///
/// `McqMulti` and `ReorderSteps` are unchecked pass-through: the
/// downstream schema declares the type tags but no structural rules for
/// their payloads, and this crate deliberately does not invent stricter
/// semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<ChoiceOption>,
        solution: ChoiceSolution,
    },
    McqMulti {
        options: Map<String, Value>,
        solution: Map<String, Value>,
    },
    TextInput {
        options: Map<String, Value>,
        solution: TextInputSolution,
    },
    Boolean {
        solution: BooleanSolution,
    },
    ReorderSteps {
        options: Map<String, Value>,
        solution: Map<String, Value>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::McqMulti { .. } => QuestionType::McqMulti,
            QuestionKind::TextInput { .. } => QuestionType::TextInput,
            QuestionKind::Boolean { .. } => QuestionType::Boolean,
            QuestionKind::ReorderSteps { .. } => QuestionType::ReorderSteps,
        }
    }

    /// Wire shape of the `options` field, as stored in the questions table.
    pub fn options_value(&self) -> Value {
        match self {
            QuestionKind::MultipleChoice { options, .. } => json!({ "options": options }),
            QuestionKind::McqMulti { options, .. }
            | QuestionKind::TextInput { options, .. }
            | QuestionKind::ReorderSteps { options, .. } => Value::Object(options.clone()),
            QuestionKind::Boolean { .. } => json!({}),
        }
    }

    /// Wire shape of the `solution` field.
    pub fn solution_value(&self) -> Value {
        match self {
            QuestionKind::MultipleChoice { solution, .. } => json!(solution),
            QuestionKind::TextInput { solution, .. } => json!(solution),
            QuestionKind::Boolean { solution } => json!(solution),
            QuestionKind::McqMulti { solution, .. }
            | QuestionKind::ReorderSteps { solution, .. } => Value::Object(solution.clone()),
        }
    }
}

/// Raw candidate shape as emitted by the model, prior to validation.
/// Field defaults mirror the downstream schema defaults.
#[derive(Debug, Deserialize)]
pub struct RawQuestion {
    content: String,
    #[serde(rename = "type", default = "default_type_tag")]
    type_tag: String,
    #[serde(default)]
    options: Map<String, Value>,
    solution: Map<String, Value>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default = "default_points")]
    points: i64,
    #[serde(default)]
    difficulty: DifficultyLevel,
    #[serde(default)]
    confidence_score: Option<f64>,
}

fn default_type_tag() -> String {
    "multiple_choice".to_string()
}

fn default_points() -> i64 {
    1
}

/// A single validated question, ready for the downstream questions table.
///
/// Only materialized through fallible construction: candidates that break
/// the schema contract are rejected before a `Question` exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    pub content: String,
    pub kind: QuestionKind,
    pub explanation: Option<String>,
    pub points: i64,
    pub difficulty: DifficultyLevel,
    pub confidence_score: Option<f64>,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Validates and constructs a question from one raw candidate value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| AppError::Validation(e.to_string()))
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = AppError;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        if raw.content.chars().count() < MIN_CONTENT_CHARS {
            return Err(AppError::Validation(format!(
                "content must be at least {} characters",
                MIN_CONTENT_CHARS
            )));
        }

        // Type resolves first; options and solution are then checked
        // against it, in that order.
        let question_type = QuestionType::from_tag(&raw.type_tag)?;

        if !(MIN_POINTS..=MAX_POINTS).contains(&raw.points) {
            return Err(AppError::Validation(format!(
                "points must be between {} and {}",
                MIN_POINTS, MAX_POINTS
            )));
        }

        if let Some(score) = raw.confidence_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(AppError::Validation(
                    "confidence_score must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        let kind = build_kind(question_type, raw.options, raw.solution)?;

        Ok(Question {
            content: raw.content,
            kind,
            explanation: raw.explanation,
            points: raw.points,
            difficulty: raw.difficulty,
            confidence_score: raw.confidence_score,
        })
    }
}

fn build_kind(
    question_type: QuestionType,
    options: Map<String, Value>,
    solution: Map<String, Value>,
) -> Result<QuestionKind> {
    match question_type {
        QuestionType::MultipleChoice => {
            let raw_options = options.get("options").ok_or_else(|| {
                AppError::Validation(
                    "multiple choice questions must have an 'options' array".to_string(),
                )
            })?;
            let entries = raw_options.as_array().ok_or_else(|| {
                AppError::Validation("'options' must be an array".to_string())
            })?;
            if entries.len() < MIN_CHOICE_OPTIONS {
                return Err(AppError::Validation(format!(
                    "must have at least {} options",
                    MIN_CHOICE_OPTIONS
                )));
            }
            let parsed: Vec<ChoiceOption> = entries
                .iter()
                .map(|entry| {
                    serde_json::from_value(entry.clone())
                        .map_err(|e| AppError::Validation(format!("invalid option entry: {}", e)))
                })
                .collect::<Result<_>>()?;

            let correct = solution
                .get("correct_option_id")
                .ok_or_else(|| {
                    AppError::Validation(
                        "multiple choice solutions must have 'correct_option_id'".to_string(),
                    )
                })?
                .as_str()
                .ok_or_else(|| {
                    AppError::Validation("'correct_option_id' must be a string".to_string())
                })?;
            if !parsed.iter().any(|option| option.id == correct) {
                return Err(AppError::Validation(format!(
                    "'correct_option_id' '{}' does not match any option id",
                    correct
                )));
            }

            Ok(QuestionKind::MultipleChoice {
                options: parsed,
                solution: ChoiceSolution {
                    correct_option_id: correct.to_string(),
                },
            })
        }
        QuestionType::TextInput => {
            // Options are free-form for text input (e.g. a placeholder).
            let exact_match = solution
                .get("exact_match")
                .ok_or_else(|| {
                    AppError::Validation(
                        "text input solutions must have 'exact_match'".to_string(),
                    )
                })?
                .as_str()
                .ok_or_else(|| {
                    AppError::Validation("'exact_match' must be a string".to_string())
                })?
                .to_string();
            let case_sensitive = solution
                .get("case_sensitive")
                .map(|value| {
                    value.as_bool().ok_or_else(|| {
                        AppError::Validation("'case_sensitive' must be a boolean".to_string())
                    })
                })
                .transpose()?;

            Ok(QuestionKind::TextInput {
                options,
                solution: TextInputSolution {
                    exact_match,
                    case_sensitive,
                },
            })
        }
        QuestionType::Boolean => {
            if !options.is_empty() {
                return Err(AppError::Validation(
                    "boolean questions must have empty options".to_string(),
                ));
            }
            let correct_value = solution
                .get("correct_value")
                .ok_or_else(|| {
                    AppError::Validation(
                        "boolean solutions must have 'correct_value'".to_string(),
                    )
                })?
                .as_bool()
                .ok_or_else(|| {
                    AppError::Validation("'correct_value' must be a boolean".to_string())
                })?;

            Ok(QuestionKind::Boolean {
                solution: BooleanSolution { correct_value },
            })
        }
        QuestionType::McqMulti => Ok(QuestionKind::McqMulti { options, solution }),
        QuestionType::ReorderSteps => Ok(QuestionKind::ReorderSteps { options, solution }),
    }
}

impl Serialize for Question {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Question", 8)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("type", self.kind.question_type().as_str())?;
        state.serialize_field("options", &self.kind.options_value())?;
        state.serialize_field("solution", &self.kind.solution_value())?;
        state.serialize_field("explanation", &self.explanation)?;
        state.serialize_field("points", &self.points)?;
        state.serialize_field("difficulty", &self.difficulty)?;
        state.serialize_field("confidence_score", &self.confidence_score)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_mcq() -> Value {
        json!({
            "content": "What is 2+2?",
            "type": "multiple_choice",
            "options": {"options": [
                {"id": "a", "text": "3"},
                {"id": "b", "text": "4"},
                {"id": "c", "text": "5"}
            ]},
            "solution": {"correct_option_id": "b"},
            "explanation": "Basic arithmetic: 2+2=4",
            "points": 1,
            "difficulty": "easy"
        })
    }

    #[test]
    fn test_valid_multiple_choice_constructs() {
        let question = Question::from_value(valid_mcq()).unwrap();
        assert_eq!(question.question_type(), QuestionType::MultipleChoice);
        assert_eq!(question.points, 1);
        assert_eq!(question.difficulty, DifficultyLevel::Easy);
        match &question.kind {
            QuestionKind::MultipleChoice { options, solution } => {
                assert_eq!(options.len(), 3);
                assert_eq!(solution.correct_option_id, "b");
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_multiple_choice_round_trips_all_fields() {
        let question = Question::from_value(valid_mcq()).unwrap();
        let serialized = serde_json::to_value(&question).unwrap();
        assert_eq!(serialized["content"], "What is 2+2?");
        assert_eq!(serialized["type"], "multiple_choice");
        assert_eq!(serialized["options"]["options"][1]["text"], "4");
        assert_eq!(serialized["solution"]["correct_option_id"], "b");
        assert_eq!(serialized["explanation"], "Basic arithmetic: 2+2=4");
        assert_eq!(serialized["points"], 1);
        assert_eq!(serialized["difficulty"], "easy");
        assert!(serialized["confidence_score"].is_null());

        let reparsed = Question::from_value(serialized).unwrap();
        assert_eq!(reparsed, question);
    }

    #[test]
    fn test_multiple_choice_requires_two_options() {
        let mut value = valid_mcq();
        value["options"]["options"] = json!([{"id": "a", "text": "only one"}]);
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("at least 2 options"), "{}", err);
    }

    #[test]
    fn test_multiple_choice_missing_options_array() {
        let mut value = valid_mcq();
        value["options"] = json!({});
        assert!(Question::from_value(value).is_err());
    }

    #[test]
    fn test_multiple_choice_solution_must_reference_an_option() {
        let mut value = valid_mcq();
        value["solution"] = json!({"correct_option_id": "z"});
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("does not match"), "{}", err);
    }

    #[test]
    fn test_text_input_requires_exact_match() {
        let value = json!({
            "content": "Name the capital of France.",
            "type": "text_input",
            "options": {"placeholder": "Enter your answer"},
            "solution": {"case_sensitive": false}
        });
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("exact_match"), "{}", err);
    }

    #[test]
    fn test_text_input_with_exact_match_constructs() {
        let value = json!({
            "content": "Name the capital of France.",
            "type": "text_input",
            "options": {"placeholder": "Enter your answer"},
            "solution": {"exact_match": "Paris", "case_sensitive": false}
        });
        let question = Question::from_value(value).unwrap();
        match &question.kind {
            QuestionKind::TextInput { solution, .. } => {
                assert_eq!(solution.exact_match, "Paris");
                assert_eq!(solution.case_sensitive, Some(false));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_boolean_requires_correct_value() {
        let value = json!({
            "content": "The sky is green.",
            "type": "boolean",
            "options": {},
            "solution": {}
        });
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("correct_value"), "{}", err);
    }

    #[test]
    fn test_boolean_accepts_both_values() {
        for correct in [true, false] {
            let value = json!({
                "content": "The sky is blue.",
                "type": "boolean",
                "options": {},
                "solution": {"correct_value": correct}
            });
            let question = Question::from_value(value).unwrap();
            match question.kind {
                QuestionKind::Boolean { solution } => {
                    assert_eq!(solution.correct_value, correct)
                }
                other => panic!("unexpected kind: {:?}", other),
            }
        }
    }

    #[test]
    fn test_boolean_rejects_non_empty_options() {
        let value = json!({
            "content": "The sky is blue.",
            "type": "boolean",
            "options": {"placeholder": "?"},
            "solution": {"correct_value": true}
        });
        assert!(Question::from_value(value).is_err());
    }

    #[test]
    fn test_points_range_is_closed() {
        for (points, ok) in [(0, false), (1, true), (5, true), (10, true), (11, false)] {
            let mut value = valid_mcq();
            value["points"] = json!(points);
            assert_eq!(Question::from_value(value).is_ok(), ok, "points={}", points);
        }
    }

    #[test]
    fn test_short_content_rejected() {
        let mut value = valid_mcq();
        value["content"] = json!("2+2?");
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("at least 10"), "{}", err);
    }

    #[test]
    fn test_unknown_type_tag_rejected() {
        let mut value = valid_mcq();
        value["type"] = json!("essay");
        let err = Question::from_value(value).unwrap_err();
        assert!(err.to_string().contains("unknown question type"), "{}", err);
    }

    #[test]
    fn test_confidence_score_bounds() {
        let mut value = valid_mcq();
        value["confidence_score"] = json!(1.5);
        assert!(Question::from_value(value).is_err());

        let mut value = valid_mcq();
        value["confidence_score"] = json!(0.92);
        let question = Question::from_value(value).unwrap();
        assert_eq!(question.confidence_score, Some(0.92));
    }

    #[test]
    fn test_type_defaults_to_multiple_choice() {
        let mut value = valid_mcq();
        value.as_object_mut().unwrap().remove("type");
        let question = Question::from_value(value).unwrap();
        assert_eq!(question.question_type(), QuestionType::MultipleChoice);
    }

    #[test]
    fn test_defaults_for_points_and_difficulty() {
        let mut value = valid_mcq();
        let object = value.as_object_mut().unwrap();
        object.remove("points");
        object.remove("difficulty");
        let question = Question::from_value(value).unwrap();
        assert_eq!(question.points, 1);
        assert_eq!(question.difficulty, DifficultyLevel::Medium);
    }

    #[test]
    fn test_mcq_multi_payload_passes_through() {
        let value = json!({
            "content": "Select all prime numbers.",
            "type": "mcq_multi",
            "options": {"anything": ["goes", "here"]},
            "solution": {"correct_option_ids": ["a", "c"]}
        });
        let question = Question::from_value(value).unwrap();
        let serialized = serde_json::to_value(&question).unwrap();
        assert_eq!(serialized["options"]["anything"][0], "goes");
        assert_eq!(serialized["solution"]["correct_option_ids"][1], "c");
    }

    #[test]
    fn test_reorder_steps_payload_passes_through() {
        let value = json!({
            "content": "Order the steps of mitosis.",
            "type": "reorder_steps",
            "options": {"steps": ["prophase", "metaphase"]},
            "solution": {"correct_order": [0, 1]}
        });
        let question = Question::from_value(value).unwrap();
        assert_eq!(question.question_type(), QuestionType::ReorderSteps);
    }

    #[test]
    fn test_missing_solution_rejected() {
        let value = json!({
            "content": "What is 2+2, really?",
            "type": "boolean",
            "options": {}
        });
        assert!(Question::from_value(value).is_err());
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<DifficultyLevel>().unwrap(), DifficultyLevel::Easy);
        assert_eq!("hard".parse::<DifficultyLevel>().unwrap(), DifficultyLevel::Hard);
        assert!("extreme".parse::<DifficultyLevel>().is_err());
    }
}
