//! Session manager for the chat REPL
//!
//! Owns the chat history lent to each turn, plus running statistics for
//! `/stats`. Nothing here is persisted.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::chat::{ChatHistory, ChatMessage, TurnOutcome};

/// Per-session counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub turns: usize,
    pub failures: usize,
    /// Matched keyword -> count
    pub symptom_hits: BTreeMap<String, usize>,
    /// Reply language -> count
    pub languages: BTreeMap<String, usize>,
    /// Answered turns with no keyword match
    pub fallbacks: usize,
}

impl SessionStats {
    /// Symptoms ordered by hit count, most frequent first
    pub fn top_symptoms(&self) -> Vec<(&str, usize)> {
        let mut hits: Vec<(&str, usize)> = self
            .symptom_hits
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        hits
    }
}

/// Session state for one REPL run
pub struct SessionManager {
    id: Uuid,
    history: ChatHistory,
    stats: SessionStats,
    started: DateTime<Utc>,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            id: Uuid::new_v4(),
            history: ChatHistory::new(),
            stats: SessionStats::default(),
            started: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mutable history for a chat turn
    pub fn history_mut(&mut self) -> &mut ChatHistory {
        &mut self.history
    }

    /// Fold a finished turn into the statistics
    pub fn record_outcome(&mut self, outcome: &TurnOutcome) {
        self.stats.turns += 1;
        match outcome {
            TurnOutcome::Answered(reply) => {
                *self.stats.languages.entry(reply.language.clone()).or_insert(0) += 1;
                match &reply.matched {
                    Some(keyword) => {
                        *self.stats.symptom_hits.entry(keyword.clone()).or_insert(0) += 1;
                    }
                    None => self.stats.fallbacks += 1,
                }
            }
            TurnOutcome::Failed { .. } => self.stats.failures += 1,
        }
    }

    /// Empty the chat history (statistics are kept)
    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }

    /// Last `limit` messages, oldest first
    pub fn recent_messages(&self, limit: usize) -> &[ChatMessage] {
        self.history.recent(limit)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Session duration in seconds
    pub fn session_duration(&self) -> u64 {
        (Utc::now() - self.started).num_seconds().max(0) as u64
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Role, RESPONDER_FAILURE_NOTICE};
    use crate::pipeline::Reply;

    fn answered(matched: Option<&str>, language: &str) -> TurnOutcome {
        let mut reply = Reply::plain("advice");
        reply.matched = matched.map(str::to_string);
        reply.language = language.to_string();
        TurnOutcome::Answered(reply)
    }

    #[test]
    fn test_session_creation() {
        let session = SessionManager::new();
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.stats().turns, 0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut session = SessionManager::new();
        session.record_outcome(&answered(Some("fever"), "en"));
        session.record_outcome(&answered(Some("fever"), "hi"));
        session.record_outcome(&answered(None, "en"));
        session.record_outcome(&TurnOutcome::Failed { notice: RESPONDER_FAILURE_NOTICE });

        let stats = session.stats();
        assert_eq!(stats.turns, 4);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.fallbacks, 1);
        assert_eq!(stats.symptom_hits.get("fever"), Some(&2));
        assert_eq!(stats.languages.get("en"), Some(&2));
    }

    #[test]
    fn test_clear_history_keeps_stats() {
        let mut session = SessionManager::new();
        session.history_mut().append(Role::User, "fever");
        session.history_mut().append(Role::Assistant, "rest");
        session.record_outcome(&answered(Some("fever"), "en"));

        assert_eq!(session.clear_history(), 2);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.stats().turns, 1);
    }

    #[test]
    fn test_top_symptoms_order() {
        let mut session = SessionManager::new();
        session.record_outcome(&answered(Some("cough"), "en"));
        session.record_outcome(&answered(Some("fever"), "en"));
        session.record_outcome(&answered(Some("fever"), "en"));
        session.record_outcome(&answered(Some("bp"), "en"));

        let top = session.stats().top_symptoms();
        assert_eq!(top[0], ("fever", 2));
        assert_eq!(top[1], ("bp", 1));
        assert_eq!(top[2], ("cough", 1));
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(SessionManager::new().id(), SessionManager::new().id());
    }
}
