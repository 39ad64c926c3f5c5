pub mod gemini;
pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use gemini::GeminiClient;
use openai::OpenAIClient;

/// One generation backend. A single call sends the full rendered prompt
/// and returns the backend's raw text: one request, one response, no
/// retry, no streaming.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String>;
}

/// Dispatches to the provider named by the config. Both clients are
/// cheap to hold, so the router owns one of each.
pub struct RouterClient {
    gemini: GeminiClient,
    openai: OpenAIClient,
}

impl RouterClient {
    pub fn new() -> Self {
        Self {
            gemini: GeminiClient::new(),
            openai: OpenAIClient::new(),
        }
    }
}

impl Default for RouterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for RouterClient {
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String> {
        match config.provider {
            LLMProvider::Gemini => self.gemini.generate(config, prompt).await,
            LLMProvider::OpenAI => self.openai.generate(config, prompt).await,
        }
    }
}
