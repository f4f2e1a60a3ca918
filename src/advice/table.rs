//! Ordered symptom -> advice table
//!
//! Iteration order is behaviourally significant: the first keyword found in a
//! query wins, so the table is a `Vec` of pairs rather than a map.

use serde::{Deserialize, Serialize};

/// Advice returned when no keyword matches
pub const FALLBACK_ADVICE: &str =
    "Rest, stay hydrated, maintain healthy diet. Consult doctor for persistent symptoms.";

/// Built-in entries, in match priority order
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("fever", "Rest, hydrate, paracetamol if needed. See doctor if fever persists >3 days."),
    ("headache", "Rest in dark room, hydrate well, paracetamol. Severe headache needs urgent care."),
    ("bp", "Reduce salt intake, exercise 30min daily, monitor BP regularly, consult doctor."),
    ("diabetes", "Monitor blood sugar, follow diet, take prescribed medication regularly."),
    ("stomach", "Rest, hydrate, avoid heavy/spicy food. Persistent pain requires medical attention."),
    ("cough", "Honey + warm water, steam inhalation. Persistent cough needs medical evaluation."),
    ("cold", "Rest, warm fluids, paracetamol. Symptoms >7 days require consultation."),
    ("pain", "Rest affected area, ice/heat therapy, paracetamol. Severe pain needs doctor."),
    ("tired", "Ensure 7-8 hours sleep, balanced diet, hydration. Persistent fatigue needs checkup."),
    ("nausea", "Small frequent meals, ginger tea, hydration. Persistent vomiting needs medical help."),
];

/// One keyword and its advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceEntry {
    pub keyword: String,
    pub advice: String,
}

impl AdviceEntry {
    /// Display label, e.g. "Fever Advice"
    pub fn label(&self) -> String {
        format!("{} Advice", title_case(&self.keyword))
    }
}

/// Result of matching a query against the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceMatch<'a> {
    /// Matched entry, `None` when the fallback applied
    pub entry: Option<&'a AdviceEntry>,
    pub advice: &'a str,
}

impl<'a> AdviceMatch<'a> {
    /// Matched keyword, if any
    pub fn keyword(&self) -> Option<&'a str> {
        self.entry.map(|e| e.keyword.as_str())
    }

    /// True when no keyword matched
    pub fn is_fallback(&self) -> bool {
        self.entry.is_none()
    }
}

/// Fixed keyword table, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceTable {
    entries: Vec<AdviceEntry>,
}

impl AdviceTable {
    /// Build a table from ordered pairs
    ///
    /// Keys are lowercased; a repeated key keeps its first position.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries: Vec<AdviceEntry> = Vec::new();
        for (keyword, advice) in pairs {
            let keyword = keyword.as_ref().to_lowercase();
            if entries.iter().any(|e| e.keyword == keyword) {
                continue;
            }
            entries.push(AdviceEntry {
                keyword,
                advice: advice.into(),
            });
        }
        Self { entries }
    }

    /// Match a query: first keyword contained in the lowercased query wins
    pub fn lookup(&self, query: &str) -> AdviceMatch<'_> {
        let lowered = query.to_lowercase();
        self.entries
            .iter()
            .find(|entry| lowered.contains(entry.keyword.as_str()))
            .map(|entry| AdviceMatch {
                entry: Some(entry),
                advice: entry.advice.as_str(),
            })
            .unwrap_or(AdviceMatch {
                entry: None,
                advice: FALLBACK_ADVICE,
            })
    }

    /// Advice string for a query (total over all inputs)
    pub fn match_query(&self, query: &str) -> &str {
        self.lookup(query).advice
    }

    /// Entries in match order
    pub fn entries(&self) -> &[AdviceEntry] {
        &self.entries
    }

    /// Entry by exact keyword
    pub fn get(&self, keyword: &str) -> Option<&AdviceEntry> {
        self.entries.iter().find(|e| e.keyword == keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AdviceTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ENTRIES.iter().copied())
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
