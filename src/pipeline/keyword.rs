//! Rule-based responder over the advice table
//!
//! Translation in both directions is a relabel only: the advice is always
//! English, non-English input just gets a language tag and captions.

use crate::advice::AdviceTable;
use crate::errors::Result;
use crate::language::LanguageDetector;
use crate::pipeline::{Annotation, Reply, Responder, ResponderMode};
use async_trait::async_trait;
use tracing::debug;

/// Keyword-table responder
#[derive(Debug, Clone, Default)]
pub struct KeywordResponder {
    table: AdviceTable,
    detector: LanguageDetector,
}

impl KeywordResponder {
    pub fn new(table: AdviceTable, detector: LanguageDetector) -> Self {
        Self { table, detector }
    }

    pub fn table(&self) -> &AdviceTable {
        &self.table
    }

    /// Synchronous core of `respond`; never fails
    pub fn reply_to(&self, query: &str) -> Reply {
        let mut annotations = Vec::new();

        // Step 1: detect
        let detection = self.detector.detect(query);
        let tag = detection.code.to_uppercase();
        if detection.detected {
            annotations.push(Annotation::Language(tag.clone()));
        }

        // Step 2: match (input is used as-is, no real translation)
        let found = self.table.lookup(query);
        let response_en = match found.entry {
            Some(entry) => format!("{}: {}", entry.label(), entry.advice),
            None => found.advice.to_string(),
        };
        debug!(
            language = %detection.code,
            keyword = found.keyword().unwrap_or("-"),
            "keyword lookup"
        );

        // Step 3: "translate" back
        let content = if detection.is_english() {
            response_en
        } else {
            annotations.push(Annotation::Input(query.to_string()));
            annotations.push(Annotation::English(response_en.clone()));
            format!("({}) {}", tag, response_en)
        };

        Reply {
            content,
            language: detection.code,
            matched: found.keyword().map(str::to_string),
            annotations,
        }
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    async fn respond(&self, query: &str) -> Result<Reply> {
        Ok(self.reply_to(query))
    }

    fn mode(&self) -> ResponderMode {
        ResponderMode::Keyword
    }

    fn describe(&self) -> String {
        format!("keyword table ({} symptoms)", self.table.len())
    }
}
