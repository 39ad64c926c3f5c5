pub mod generate_questions;
pub mod prompt_builder;
pub mod response_validator;
