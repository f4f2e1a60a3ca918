//! Property tests for the symptom matcher and language fallback

use medibuddy::{
    advice::{AdviceTable, FALLBACK_ADVICE},
    chat::ChatHistory,
    language::LanguageDetector,
    pipeline::{KeywordResponder, Responder},
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn mentions_any_keyword(table: &AdviceTable, text: &str) -> bool {
    let lowered = text.to_lowercase();
    table
        .entries()
        .iter()
        .any(|e| lowered.contains(e.keyword.as_str()))
}

#[quickcheck]
fn prop_case_insensitive(query: String) -> bool {
    let table = AdviceTable::default();
    table.match_query(&query.to_ascii_uppercase()) == table.match_query(&query)
}

#[quickcheck]
fn prop_no_keyword_means_fallback(query: String) -> TestResult {
    let table = AdviceTable::default();
    if mentions_any_keyword(&table, &query) {
        return TestResult::discard();
    }
    TestResult::from_bool(table.match_query(&query) == FALLBACK_ADVICE)
}

#[quickcheck]
fn prop_embedded_keyword_is_found(prefix: String, index: usize) -> TestResult {
    let table = AdviceTable::default();
    if mentions_any_keyword(&table, &prefix) {
        return TestResult::discard();
    }
    let entry = &table.entries()[index % table.len()];
    let query = format!("{} {}", prefix, entry.keyword);

    // An earlier keyword can straddle the join; only the boundary case is checked
    let found = table.lookup(&query);
    let position = table
        .entries()
        .iter()
        .position(|e| Some(e.keyword.as_str()) == found.keyword());
    TestResult::from_bool(position.is_some_and(|p| p <= index % table.len()))
}

#[quickcheck]
fn prop_first_in_table_order_wins(a: usize, b: usize) -> bool {
    let table = AdviceTable::default();
    let (i, j) = (a % table.len(), b % table.len());
    let first = &table.entries()[i];
    let second = &table.entries()[j];

    let query = format!("{} and {}", second.keyword, first.keyword);
    let winner = table.lookup(&query).keyword().map(str::to_string);
    let earliest = table.entries()[..=i.max(j)]
        .iter()
        .find(|e| query.contains(e.keyword.as_str()))
        .map(|e| e.keyword.clone());
    winner == earliest
}

#[quickcheck]
fn prop_detection_never_panics_and_has_a_code(text: String) -> bool {
    let detection = LanguageDetector::default().detect(&text);
    !detection.code.is_empty() && (detection.detected || detection.code == "en")
}

#[quickcheck]
fn prop_keyword_responder_always_answers(query: String) -> bool {
    let responder = KeywordResponder::default();
    tokio_test::block_on(responder.respond(&query)).is_ok()
}

#[quickcheck]
fn prop_clear_always_empties(turns: Vec<String>) -> bool {
    let responder = KeywordResponder::default();
    let mut history = ChatHistory::new();
    for query in &turns {
        tokio_test::block_on(medibuddy::chat::submit(&responder, &mut history, query));
    }
    let grew = history.len() == turns.len() * 2;
    history.clear();
    grew && history.is_empty()
}

#[test]
fn test_fever_cough_prefers_fever() {
    let table = AdviceTable::default();
    assert_eq!(table.lookup("cough with fever").keyword(), Some("fever"));
    assert_eq!(table.match_query("FEVER today"), table.match_query("fever today"));
}

#[test]
fn test_empty_query_is_fallback() {
    assert_eq!(AdviceTable::default().match_query(""), FALLBACK_ADVICE);
}
