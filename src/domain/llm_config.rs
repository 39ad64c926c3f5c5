use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Hard cap on backend output size, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LLMProvider {
    Gemini,
    OpenAI,
}

impl LLMProvider {
    /// Maps the known model-name prefixes to a provider. Anything else is
    /// a configuration error; the typed selector on [`LLMConfig`] is what
    /// the clients actually dispatch on, so an unrecognized name fails
    /// loudly here instead of being silently misrouted.
    pub fn infer(model: &str) -> Result<Self> {
        if model.starts_with("gemini") {
            Ok(LLMProvider::Gemini)
        } else if model.starts_with("gpt") {
            Ok(LLMProvider::OpenAI)
        } else {
            Err(AppError::Configuration(format!(
                "unsupported model: {}",
                model
            )))
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => GEMINI_BASE_URL,
            LLMProvider::OpenAI => OPENAI_BASE_URL,
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "GEMINI_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LLMConfig {
    pub fn for_provider(provider: LLMProvider, model: &str, temperature: f32) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            model: model.to_string(),
            api_key: None,
            max_tokens: Some(MAX_OUTPUT_TOKENS),
            temperature: Some(temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_known_prefixes() {
        assert_eq!(
            LLMProvider::infer("gemini-1.5-flash").unwrap(),
            LLMProvider::Gemini
        );
        assert_eq!(
            LLMProvider::infer("gpt-4o-mini").unwrap(),
            LLMProvider::OpenAI
        );
    }

    #[test]
    fn test_infer_rejects_unknown_model() {
        let err = LLMProvider::infer("claude-3-haiku").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("unsupported model"));
    }

    #[test]
    fn test_config_defaults() {
        let config = LLMConfig::for_provider(LLMProvider::Gemini, "gemini-1.5-flash", 0.7);
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.max_tokens, Some(MAX_OUTPUT_TOKENS));
        assert!(config.api_key.is_none());
    }
}
