pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use application::GenerateQuestionsUseCase;
pub use domain::error::{AppError, Result};
pub use domain::generation::{
    DifficultyDistribution, GenerationRequest, GenerationResponse, RejectedCandidate,
};
pub use domain::llm_config::{LLMConfig, LLMProvider};
pub use domain::question::{DifficultyLevel, Question, QuestionKind, QuestionType};
