pub mod use_cases;

pub use use_cases::generate_questions::GenerateQuestionsUseCase;
pub use use_cases::prompt_builder::PromptBuilder;
pub use use_cases::response_validator::{BatchOutcome, ResponseValidator};
