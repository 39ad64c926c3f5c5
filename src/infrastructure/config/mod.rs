use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMProvider;

/// Resolves provider credentials from the environment. A missing key is
/// a fatal configuration error, raised before any network call is made.
pub struct ConfigService;

impl ConfigService {
    pub fn new() -> Self {
        Self
    }

    pub fn api_key_for(&self, provider: LLMProvider) -> Result<String> {
        let var = provider.credential_var();
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::Configuration(format!(
                "{} environment variable not set",
                var
            ))),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
