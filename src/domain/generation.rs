use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::question::{DifficultyLevel, Question};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Requested question counts per difficulty level. Zero is a valid count
/// for any level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    #[serde(default)]
    pub easy: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub hard: u32,
}

impl DifficultyDistribution {
    /// Saturates instead of overflowing: counts come straight from user
    /// input, and a clamped total is still a sane prompt.
    pub fn total(&self) -> u32 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }

    /// Counts in fixed easy, medium, hard order. The prompt builder
    /// relies on this ordering for deterministic output.
    pub fn counts(&self) -> [(DifficultyLevel, u32); 3] {
        [
            (DifficultyLevel::Easy, self.easy),
            (DifficultyLevel::Medium, self.medium),
            (DifficultyLevel::Hard, self.hard),
        ]
    }

    pub fn set(&mut self, level: DifficultyLevel, count: u32) {
        match level {
            DifficultyLevel::Easy => self.easy = count,
            DifficultyLevel::Medium => self.medium = count,
            DifficultyLevel::Hard => self.hard = count,
        }
    }
}

/// One generation call's worth of input. Constructed per call and
/// discarded after use; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 50))]
    pub text: String,
    /// Target skill UUID, treated as opaque here.
    pub skill_id: String,
    pub distribution: DifficultyDistribution,
    pub model: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    pub custom_instructions: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        text: String,
        skill_id: String,
        distribution: DifficultyDistribution,
        model: Option<String>,
        temperature: Option<f32>,
        custom_instructions: Option<String>,
    ) -> Result<Self> {
        let request = Self {
            text,
            skill_id,
            distribution,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            custom_instructions,
        };
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(request)
    }
}

/// A candidate the batch validator discarded, with its 1-based position
/// in the model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub position: usize,
    pub reason: String,
}

/// Outcome of one generation call. Question order is the order the model
/// returned them; rejected candidates are exposed alongside so callers
/// can inspect why items were dropped. No mutation after construction.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub questions: Vec<Question>,
    pub rejected: Vec<RejectedCandidate>,
    pub total_generated: usize,
    pub token_count: usize,
    pub generation_time_ms: u64,
    pub model_used: String,
}
