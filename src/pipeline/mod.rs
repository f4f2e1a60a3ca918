//! Responders: turn one user query into one reply
//!
//! - `KeywordResponder`: detect -> translate -> match -> translate back
//! - `ModelResponder`: prompt an external text-generation model
//!
//! Both are stateless; session history lives with the caller (see `chat`).

pub mod keyword;
pub mod model;

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use keyword::KeywordResponder;
pub use model::{ModelResponder, PROMPT_PREFIX};

/// Which responder backs the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    /// Rule-based keyword table
    Keyword,
    /// External text-generation model
    Model,
}

impl ResponderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponderMode::Keyword => "keyword",
            ResponderMode::Model => "model",
        }
    }
}

impl fmt::Display for ResponderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmetic caption shown alongside a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Annotation {
    /// Detected input language (upper-case code)
    Language(String),
    /// Original, untranslated input
    Input(String),
    /// English rendering before "translation" back
    English(String),
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Language(code) => write!(f, "Language: {}", code),
            Annotation::Input(text) => write!(f, "Input: {}", text),
            Annotation::English(text) => write!(f, "English: {}", text),
        }
    }
}

/// Responder output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Text appended to history and shown to the user
    pub content: String,
    /// Language code used for the reply
    pub language: String,
    /// Keyword that produced the advice, if any
    pub matched: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl Reply {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: "en".to_string(),
            matched: None,
            annotations: Vec::new(),
        }
    }
}

/// One-shot query -> reply transformation
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, query: &str) -> Result<Reply>;

    fn mode(&self) -> ResponderMode;

    /// Short description for `/mode` and the banner
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_display() {
        assert_eq!(Annotation::Language("TA".into()).to_string(), "Language: TA");
        assert_eq!(Annotation::Input("x".into()).to_string(), "Input: x");
        assert_eq!(Annotation::English("y".into()).to_string(), "English: y");
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&ResponderMode::Model).unwrap();
        assert_eq!(json, "\"model\"");
        assert_eq!(ResponderMode::Keyword.to_string(), "keyword");
    }

    #[test]
    fn test_plain_reply() {
        let reply = Reply::plain("hello");
        assert_eq!(reply.language, "en");
        assert!(reply.annotations.is_empty());
        assert!(reply.matched.is_none());
    }
}
