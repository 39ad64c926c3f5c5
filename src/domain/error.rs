use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of a raw backend response is kept for diagnostics when it
/// cannot be parsed.
pub const RAW_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// Unsupported model identifier or missing credential. Fatal at
    /// construction time, never retried.
    Configuration(String),
    /// A single candidate question failed schema rules. Recovered locally
    /// during batch validation; fatal when raised for a request object.
    Validation(String),
    /// Backend output was not parseable as a JSON array. Fatal for the
    /// whole generation call; carries a bounded preview of the raw text.
    MalformedResponse { message: String, preview: String },
    /// Network, auth, rate-limit or response-shape failure from a
    /// generation backend. Surfaced verbatim, no internal retry.
    Backend(String),
    Parse(String),
    Io(String),
}

impl AppError {
    /// Builds a `MalformedResponse` error, truncating the raw backend
    /// text to the first [`RAW_PREVIEW_CHARS`] characters.
    pub fn malformed_response(message: impl Into<String>, raw: &str) -> Self {
        let preview = match raw.char_indices().nth(RAW_PREVIEW_CHARS) {
            Some((offset, _)) => raw[..offset].to_string(),
            None => raw.to_string(),
        };
        AppError::MalformedResponse {
            message: message.into(),
            preview,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::MalformedResponse { message, .. } => {
                write!(f, "Malformed response: {}", message)
            }
            AppError::Backend(msg) => write!(f, "Backend error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AppError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
