//! CLI glue around the generation pipeline. All business logic lives in
//! the application layer; this module only parses arguments, reads plain
//! text in, and writes the report JSON out.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::application::GenerateQuestionsUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::generation::{
    DifficultyDistribution, GenerationRequest, GenerationResponse, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use crate::domain::question::{DifficultyLevel, Question};

#[derive(Parser)]
#[clap(
    name = "content-engine",
    version,
    about = "Generate validated curriculum questions from plain text with an LLM backend"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate questions from a plain-text source
    Generate {
        /// Path to a plain-text file, or `-` for stdin
        #[clap(long)]
        input: String,
        /// UUID of the target skill
        #[clap(long)]
        skill_id: String,
        /// Per-difficulty counts, e.g. `easy:10,medium:20,hard:10`
        #[clap(long)]
        difficulty: String,
        /// Model identifier (gemini-* or gpt-*)
        #[clap(long, default_value = DEFAULT_MODEL)]
        model: String,
        /// Sampling temperature in [0.0, 2.0]
        #[clap(long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f32,
        /// Extra instructions passed to the model verbatim
        #[clap(long)]
        instructions: Option<String>,
        /// Write the report here instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

/// Downstream-facing report shape: a metadata block plus the validated
/// questions with all their fields.
#[derive(Serialize)]
pub struct GenerationReport {
    pub metadata: ReportMetadata,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct ReportMetadata {
    pub model: String,
    pub total_generated: usize,
    pub generation_time_ms: u64,
    pub token_count: usize,
}

impl GenerationReport {
    pub fn from_response(response: GenerationResponse) -> Self {
        Self {
            metadata: ReportMetadata {
                model: response.model_used,
                total_generated: response.total_generated,
                generation_time_ms: response.generation_time_ms,
                token_count: response.token_count,
            },
            questions: response.questions,
        }
    }
}

/// Parses the `level:count` pair list. Malformed pairs fail naming the
/// offending segment.
pub fn parse_distribution(input: &str) -> Result<DifficultyDistribution> {
    let mut distribution = DifficultyDistribution::default();

    for segment in input.split(',') {
        let (level, count) = segment.split_once(':').ok_or_else(|| {
            AppError::Parse(format!(
                "invalid distribution segment '{}': expected level:count",
                segment
            ))
        })?;
        let level: DifficultyLevel = level.trim().to_lowercase().parse()?;
        let count: u32 = count.trim().parse().map_err(|_| {
            AppError::Parse(format!(
                "invalid distribution segment '{}': count must be a non-negative integer",
                segment
            ))
        })?;
        distribution.set(level, count);
    }

    Ok(distribution)
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            skill_id,
            difficulty,
            model,
            temperature,
            instructions,
            output,
        } => {
            Uuid::parse_str(&skill_id)
                .map_err(|_| AppError::Parse(format!("invalid skill id: {}", skill_id)))?;

            let distribution = parse_distribution(&difficulty)?;
            let text = read_source(&input)?;

            let use_case = GenerateQuestionsUseCase::from_env(&model, temperature)?;
            let request = GenerationRequest::new(
                text,
                skill_id,
                distribution,
                Some(model),
                Some(temperature),
                instructions,
            )?;

            let response = use_case.execute(&request).await?;
            let report = GenerationReport::from_response(response);
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Io(e.to_string()))?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!(
                        total = report.metadata.total_generated,
                        output = %path.display(),
                        "saved generated questions"
                    );
                }
                None => println!("{}", rendered),
            }

            Ok(())
        }
    }
}

fn read_source(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distribution_full() {
        let distribution = parse_distribution("easy:10,medium:20,hard:10").unwrap();
        assert_eq!(distribution.easy, 10);
        assert_eq!(distribution.medium, 20);
        assert_eq!(distribution.hard, 10);
    }

    #[test]
    fn test_parse_distribution_partial_levels_default_to_zero() {
        let distribution = parse_distribution("medium:5").unwrap();
        assert_eq!(distribution.easy, 0);
        assert_eq!(distribution.medium, 5);
        assert_eq!(distribution.hard, 0);
    }

    #[test]
    fn test_parse_distribution_tolerates_whitespace_and_case() {
        let distribution = parse_distribution(" Easy : 3 , hard : 2 ").unwrap();
        assert_eq!(distribution.easy, 3);
        assert_eq!(distribution.hard, 2);
    }

    #[test]
    fn test_parse_distribution_names_offending_segment() {
        let err = parse_distribution("easy:1,bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"), "{}", err);
    }

    #[test]
    fn test_parse_distribution_rejects_unknown_level() {
        let err = parse_distribution("extreme:4").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_parse_distribution_rejects_non_numeric_count() {
        let err = parse_distribution("easy:lots").unwrap_err();
        assert!(err.to_string().contains("easy:lots"), "{}", err);
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let report = GenerationReport {
            metadata: ReportMetadata {
                model: "gemini-1.5-flash".to_string(),
                total_generated: 0,
                generation_time_ms: 12,
                token_count: 34,
            },
            questions: Vec::new(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["metadata"]["model"], "gemini-1.5-flash");
        assert_eq!(value["metadata"]["generation_time_ms"], 12);
        assert_eq!(value["metadata"]["token_count"], 34);
        assert!(value["questions"].as_array().unwrap().is_empty());
    }
}
