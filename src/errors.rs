//! Error types for MediBuddy
//!
//! One error enum for the whole chat pipeline. Only two kinds ever reach the
//! chat turn: language detection (always swallowed) and model invocation
//! (surfaced as a fixed notice).

use thiserror::Error;

/// Main error type for the chatbot
#[derive(Error, Debug)]
pub enum ChatError {
    /// Language identification could not decide
    #[error("Language detection failed: {0}")]
    LanguageDetection(String),

    /// Text-generation service returned an error
    #[error("Model API error: {0}")]
    ModelApiError(String),

    /// Text-generation service answered with no candidates
    #[error("Model returned no generated text")]
    EmptyGeneration,

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Timeout errors
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::Timeout { duration_ms: 60000 };
        assert!(err.to_string().contains("60000"));
    }

    #[test]
    fn test_model_api_error() {
        let err = ChatError::ModelApiError("HTTP 503: loading".to_string());
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().starts_with("Model API error"));
    }

    #[test]
    fn test_config_error_converts_to_anyhow() {
        let err: anyhow::Error = ChatError::ConfigError("bad max_length".to_string()).into();
        assert!(err.to_string().contains("bad max_length"));
    }
}
