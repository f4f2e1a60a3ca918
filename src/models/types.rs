//! Wire types for the text-generation inference API
//!
//! Request: `{"inputs": "...", "parameters": {"max_length": 200}}`
//! Response: `[{"generated_text": "..."}]`, or `{"error": "..."}` on failure.

use serde::{Deserialize, Serialize};

/// Generation request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
}

/// One ranked candidate returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub generated_text: String,
}

/// Either a candidate list or an API error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Candidates(Vec<Generation>),
    Failure(ApiErrorBody),
}

/// Error body returned by the inference service
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

impl ApiErrorBody {
    /// Error text, with a retry hint when the model is still loading
    pub fn message(&self) -> String {
        match self.estimated_time {
            Some(secs) => format!("{} (retry in ~{:.0}s)", self.error, secs),
            None => self.error.clone(),
        }
    }
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_length: u32) -> Self {
        Self {
            inputs: prompt.into(),
            parameters: GenerationParameters { max_length },
        }
    }
}
