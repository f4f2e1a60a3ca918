//! Chat turn: the boundary between the shell and the responders
//!
//! The caller owns the `ChatHistory` and lends it to `submit`. Append and
//! clear are the only mutations.

use crate::pipeline::{Reply, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Notice shown when the responder fails
pub const RESPONDER_FAILURE_NOTICE: &str =
    "Sorry, I couldn't generate medical advice right now. Please try again later.";

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only message history for one session
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Remove every message
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Last `limit` messages, oldest first
    pub fn recent(&self, limit: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Reply produced and appended
    Answered(Reply),
    /// Responder failed; only the user message was appended
    Failed { notice: &'static str },
}

impl TurnOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, TurnOutcome::Answered(_))
    }

    /// Text to show the user
    pub fn display_text(&self) -> &str {
        match self {
            TurnOutcome::Answered(reply) => &reply.content,
            TurnOutcome::Failed { notice } => notice,
        }
    }
}

/// Run one chat turn against `responder`, recording it in `history`
pub async fn submit(responder: &dyn Responder, history: &mut ChatHistory, query: &str) -> TurnOutcome {
    history.append(Role::User, query);

    match responder.respond(query).await {
        Ok(reply) => {
            info!(
                mode = %responder.mode(),
                language = %reply.language,
                matched = reply.matched.as_deref().unwrap_or("-"),
                "turn answered"
            );
            history.append(Role::Assistant, reply.content.clone());
            TurnOutcome::Answered(reply)
        }
        Err(e) => {
            warn!(mode = %responder.mode(), error = %e, "turn failed");
            TurnOutcome::Failed {
                notice: RESPONDER_FAILURE_NOTICE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ChatError, Result};
    use crate::pipeline::{KeywordResponder, ResponderMode};
    use async_trait::async_trait;

    struct BrokenResponder;

    #[async_trait]
    impl Responder for BrokenResponder {
        async fn respond(&self, _query: &str) -> Result<Reply> {
            Err(ChatError::Timeout { duration_ms: 60000 })
        }

        fn mode(&self) -> ResponderMode {
            ResponderMode::Model
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[tokio::test]
    async fn test_answered_turn_appends_both() {
        let responder = KeywordResponder::default();
        let mut history = ChatHistory::new();

        let outcome = submit(&responder, &mut history, "fever").await;
        assert!(outcome.is_answered());
        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].role, Role::User);
        assert_eq!(history.messages()[0].content, "fever");
        assert_eq!(history.messages()[1].role, Role::Assistant);
        assert_eq!(history.messages()[1].content, outcome.display_text());
    }

    #[tokio::test]
    async fn test_failed_turn_skips_assistant() {
        let mut history = ChatHistory::new();

        let outcome = submit(&BrokenResponder, &mut history, "fever").await;
        assert_eq!(outcome, TurnOutcome::Failed { notice: RESPONDER_FAILURE_NOTICE });
        assert_eq!(outcome.display_text(), RESPONDER_FAILURE_NOTICE);
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].role, Role::User);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = ChatHistory::new();
        for i in 0..7 {
            history.append(Role::User, format!("q{}", i));
        }
        history.clear();
        assert!(history.is_empty());

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_recent() {
        let mut history = ChatHistory::new();
        for i in 0..5 {
            history.append(Role::User, format!("q{}", i));
        }
        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "q3");
        assert_eq!(recent[1].content, "q4");
        assert_eq!(history.recent(50).len(), 5);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
