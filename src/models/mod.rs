//! Text-generation collaborator
//!
//! The model responder only needs "prompt in, ranked strings out"; the
//! `TextGenerator` trait is that seam, `InferenceClient` the HTTP side of it.

pub mod client;
pub mod types;

use crate::errors::Result;
use async_trait::async_trait;

pub use client::InferenceClient;
pub use types::Generation;

/// External sequence-to-sequence model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate ranked candidates for a prompt
    async fn generate(&self, prompt: &str, max_length: u32) -> Result<Vec<Generation>>;

    /// Human-readable identifier for logs and `/mode`
    fn name(&self) -> &str;
}
