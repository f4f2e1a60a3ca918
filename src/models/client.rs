//! HTTP client for a hosted text-generation model
//!
//! Speaks the Hugging Face style inference protocol: one POST per prompt,
//! a JSON array of ranked candidates back.

use crate::errors::{ChatError, Result};
use crate::models::types::{Generation, GenerationRequest, GenerationResponse};
use crate::models::TextGenerator;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default inference endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-base";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Inference API client
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl InferenceClient {
    /// Create client against the default endpoint without a token
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_ENDPOINT, None, DEFAULT_TIMEOUT)
    }

    /// Create client with custom configuration
    pub fn with_config(endpoint: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChatError::HttpError)?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_token,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Check whether the endpoint answers at all
    ///
    /// Any HTTP response counts; only transport failures are "unavailable".
    pub async fn is_available(&self) -> bool {
        self.client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }

    fn map_send_error(&self, err: reqwest::Error) -> ChatError {
        if err.is_timeout() {
            ChatError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ChatError::ModelApiError(format!("Failed to send request: {}", err))
        }
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &str, max_length: u32) -> Result<Vec<Generation>> {
        let request = GenerationRequest::new(prompt, max_length);
        let start = Instant::now();

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        debug!(%status, bytes = body.len(), "inference response received");

        let parsed: Option<GenerationResponse> = serde_json::from_str(&body).ok();
        match parsed {
            Some(GenerationResponse::Failure(err)) => {
                Err(ChatError::ModelApiError(format!("HTTP {}: {}", status, err.message())))
            }
            _ if !status.is_success() => {
                Err(ChatError::ModelApiError(format!("HTTP {}: {}", status, body)))
            }
            Some(GenerationResponse::Candidates(candidates)) => {
                info!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    candidates = candidates.len(),
                    "text generation complete"
                );
                Ok(candidates)
            }
            None => Err(ChatError::ModelApiError(format!(
                "Unexpected response body: {}",
                body
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}
