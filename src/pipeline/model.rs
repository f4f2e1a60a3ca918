//! Responder backed by an external text-generation model
//!
//! One call per query, no retry, no post-processing beyond taking the first
//! candidate verbatim.

use crate::errors::{ChatError, Result};
use crate::models::TextGenerator;
use crate::pipeline::{Reply, Responder, ResponderMode};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Prompt template prefix
pub const PROMPT_PREFIX: &str = "medical advice: ";

/// Default maximum generated length
pub const DEFAULT_MAX_LENGTH: u32 = 200;

/// Model-backed responder
pub struct ModelResponder {
    generator: Arc<dyn TextGenerator>,
    max_length: u32,
}

impl ModelResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, max_length: u32) -> Self {
        Self {
            generator,
            max_length,
        }
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    /// Prompt sent for a query
    pub fn prompt_for(query: &str) -> String {
        format!("{}{}", PROMPT_PREFIX, query)
    }
}

#[async_trait]
impl Responder for ModelResponder {
    async fn respond(&self, query: &str) -> Result<Reply> {
        let prompt = Self::prompt_for(query);
        let candidates = self
            .generator
            .generate(&prompt, self.max_length)
            .await
            .map_err(|e| {
                warn!(model = self.generator.name(), error = %e, "text generation failed");
                e
            })?;

        let first = candidates.into_iter().next().ok_or(ChatError::EmptyGeneration)?;
        Ok(Reply::plain(first.generated_text))
    }

    fn mode(&self) -> ResponderMode {
        ResponderMode::Model
    }

    fn describe(&self) -> String {
        format!("model {} (max_length {})", self.generator.name(), self.max_length)
    }
}
