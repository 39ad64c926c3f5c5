use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span, Instrument};

use crate::application::use_cases::prompt_builder::PromptBuilder;
use crate::application::use_cases::response_validator::ResponseValidator;
use crate::domain::error::Result;
use crate::domain::generation::{GenerationRequest, GenerationResponse};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::{LLMClient, RouterClient};
use crate::shared::token_counter::TokenCounter;

/// End-to-end generation pipeline: prompt rendering, one backend call,
/// batch validation, metrics. Stateless across calls; concurrent
/// executes are fully independent.
pub struct GenerateQuestionsUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl GenerateQuestionsUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }

    /// Resolves the provider and its credential up front, so an
    /// unsupported model or a missing API key fails construction before
    /// any network traffic.
    pub fn from_env(model: &str, temperature: f32) -> Result<Self> {
        let provider = LLMProvider::infer(model)?;
        let api_key = ConfigService::new().api_key_for(provider)?;

        let mut config = LLMConfig::for_provider(provider, model, temperature);
        config.api_key = Some(api_key);

        info!(model, provider = ?provider, "initialized question generator");
        Ok(Self::new(Arc::new(RouterClient::new()), config))
    }

    pub async fn execute(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let span = info_span!(
            "generate_questions",
            skill_id = %request.skill_id,
            model = %self.config.model,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let prompt = PromptBuilder::build(
            &request.text,
            &request.distribution,
            request.custom_instructions.as_deref(),
        );

        info!(
            requested = request.distribution.total(),
            "generating questions"
        );
        debug!(prompt_chars = prompt.len(), "prompt rendered");

        // Elapsed time covers the backend call through validation.
        let started = Instant::now();
        let raw = self.llm_client.generate(&self.config, &prompt).await?;
        let outcome = ResponseValidator::validate(&raw)?;
        let generation_time_ms = started.elapsed().as_millis() as u64;

        let total_generated = outcome.accepted.len();
        info!(
            total_generated,
            rejected = outcome.rejected.len(),
            generation_time_ms,
            "generation complete"
        );

        Ok(GenerationResponse {
            questions: outcome.accepted,
            rejected: outcome.rejected,
            total_generated,
            token_count: TokenCounter::estimate_call(&prompt, &raw),
            generation_time_ms,
            model_used: self.config.model.clone(),
        })
    }
}
