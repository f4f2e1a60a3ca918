//! Lightweight language identification for chat input
//!
//! Non-Latin scripts are identified by Unicode block; Latin text is scored
//! against small per-language indicator word lists. Short or non-alphabetic
//! input fails detection and callers fall back to a default code.

use crate::errors::{ChatError, Result};
use tracing::debug;

/// Code used when detection fails
pub const DEFAULT_LANGUAGE: &str = "en";

/// Writing systems distinguished by block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Tamil,
    Devanagari,
    Bengali,
    Telugu,
    Kannada,
    Malayalam,
    Gujarati,
    Gurmukhi,
    Arabic,
    Hebrew,
    Cyrillic,
    Greek,
    Thai,
    Hangul,
    Kana,
    Han,
}

impl Script {
    const ALL: [Script; 17] = [
        Script::Latin,
        Script::Tamil,
        Script::Devanagari,
        Script::Bengali,
        Script::Telugu,
        Script::Kannada,
        Script::Malayalam,
        Script::Gujarati,
        Script::Gurmukhi,
        Script::Arabic,
        Script::Hebrew,
        Script::Cyrillic,
        Script::Greek,
        Script::Thai,
        Script::Hangul,
        Script::Kana,
        Script::Han,
    ];

    fn of(ch: char) -> Option<Script> {
        let cp = ch as u32;
        let script = match cp {
            0x0900..=0x097F => Script::Devanagari,
            0x0980..=0x09FF => Script::Bengali,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            0x0590..=0x05FF => Script::Hebrew,
            0x0400..=0x04FF => Script::Cyrillic,
            0x0370..=0x03FF => Script::Greek,
            0x0E00..=0x0E7F => Script::Thai,
            0xAC00..=0xD7AF | 0x1100..=0x11FF => Script::Hangul,
            0x3040..=0x30FF => Script::Kana,
            0x4E00..=0x9FFF | 0x3400..=0x4DBF => Script::Han,
            _ if ch.is_ascii_alphabetic() => Script::Latin,
            0x00C0..=0x024F if ch.is_alphabetic() => Script::Latin,
            _ => return None,
        };
        Some(script)
    }

    /// ISO 639-1 code for a non-Latin script
    fn language_code(self) -> Option<&'static str> {
        let code = match self {
            Script::Latin => return None,
            Script::Tamil => "ta",
            Script::Devanagari => "hi",
            Script::Bengali => "bn",
            Script::Telugu => "te",
            Script::Kannada => "kn",
            Script::Malayalam => "ml",
            Script::Gujarati => "gu",
            Script::Gurmukhi => "pa",
            Script::Arabic => "ar",
            Script::Hebrew => "he",
            Script::Cyrillic => "ru",
            Script::Greek => "el",
            Script::Thai => "th",
            Script::Hangul => "ko",
            Script::Kana => "ja",
            Script::Han => "zh",
        };
        Some(code)
    }
}

const ENGLISH_WORDS: &str =
    "i have has is am my a an the and with feel of in it to me since very not what should do";
const FRENCH_WORDS: &str =
    "je j ai le la les un une des du de et est mal suis avec pour mon ma mes très fièvre tête";
const SPANISH_WORDS: &str = "yo tengo el los las y con mi estoy muy dolor fiebre cabeza que del";
const GERMAN_WORDS: &str =
    "ich habe und der die das mit bin nicht mein ein eine fieber kopfschmerzen seit";
const ITALIAN_WORDS: &str = "ho il di sono mio mia febbre testa che molto gli";
const PORTUGUESE_WORDS: &str = "eu tenho estou com meu minha dor febre cabeça não muito o";

/// Indicator words per Latin-script language, English first (wins ties)
const LATIN_INDICATORS: &[(&str, &str)] = &[
    ("en", ENGLISH_WORDS),
    ("fr", FRENCH_WORDS),
    ("es", SPANISH_WORDS),
    ("de", GERMAN_WORDS),
    ("it", ITALIAN_WORDS),
    ("pt", PORTUGUESE_WORDS),
];

/// Detect the language of `text`
///
/// Returns an ISO 639-1 code, or `LanguageDetection` when the text has no
/// letters or is undecidable Latin text.
pub fn detect_language(text: &str) -> Result<String> {
    let mut counts = [0usize; Script::ALL.len()];
    for ch in text.chars() {
        if let Some(script) = Script::of(ch) {
            if let Some(idx) = Script::ALL.iter().position(|s| *s == script) {
                counts[idx] += 1;
            }
        }
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return Err(ChatError::LanguageDetection(
            "no alphabetic characters in input".to_string(),
        ));
    }

    // Kana mixed with Han is Japanese
    let kana = counts[Script::ALL.len() - 2];
    let han = counts[Script::ALL.len() - 1];
    if kana > 0 && kana + han >= total - kana - han {
        return Ok("ja".to_string());
    }

    let mut dominant = Script::Latin;
    let mut best = 0usize;
    for (script, count) in Script::ALL.iter().zip(counts.iter()) {
        if *count > best {
            best = *count;
            dominant = *script;
        }
    }

    match dominant.language_code() {
        Some(code) => Ok(code.to_string()),
        None => detect_latin(text),
    }
}

fn detect_latin(text: &str) -> Result<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let mut best: Option<(&str, usize)> = None;
    for (code, indicators) in LATIN_INDICATORS {
        let score = words
            .iter()
            .filter(|w| indicators.split_whitespace().any(|i| i == **w))
            .count();
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((*code, score));
        }
    }

    match best {
        Some((code, _)) => Ok(code.to_string()),
        None if text.is_ascii() => Ok("en".to_string()),
        None => Err(ChatError::LanguageDetection(
            "no language indicators in Latin text".to_string(),
        )),
    }
}

/// Outcome of detection with fallback applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub code: String,
    /// False when the fallback code was substituted
    pub detected: bool,
}

impl Detection {
    pub fn is_english(&self) -> bool {
        self.code == "en"
    }
}

/// Detector with a configured fallback language
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    fallback: String,
}

impl LanguageDetector {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Detect, substituting the fallback on any failure
    pub fn detect(&self, text: &str) -> Detection {
        match detect_language(text) {
            Ok(code) => Detection { code, detected: true },
            Err(e) => {
                debug!(error = %e, fallback = %self.fallback, "language detection failed");
                Detection {
                    code: self.fallback.clone(),
                    detected: false,
                }
            }
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        assert_eq!(detect_language("I have a fever and headache").unwrap(), "en");
    }

    #[test]
    fn bare_ascii_word_is_english() {
        assert_eq!(detect_language("fever").unwrap(), "en");
    }

    #[test]
    fn detects_tamil() {
        assert_eq!(detect_language("எனக்கு ஜ்வரம்").unwrap(), "ta");
    }

    #[test]
    fn detects_hindi() {
        assert_eq!(detect_language("मुझे सिरदर्द है").unwrap(), "hi");
    }

    #[test]
    fn detects_french() {
        assert_eq!(detect_language("J'ai de la fièvre et mal à la tête").unwrap(), "fr");
    }

    #[test]
    fn detects_spanish() {
        assert_eq!(detect_language("Tengo fiebre y dolor de cabeza").unwrap(), "es");
    }

    #[test]
    fn detects_german() {
        assert_eq!(detect_language("Ich habe Fieber und Kopfschmerzen").unwrap(), "de");
    }

    #[test]
    fn detects_japanese_and_chinese() {
        assert_eq!(detect_language("頭が痛いです").unwrap(), "ja");
        assert_eq!(detect_language("我头痛").unwrap(), "zh");
    }

    #[test]
    fn detects_russian() {
        assert_eq!(detect_language("У меня болит голова").unwrap(), "ru");
    }

    #[test]
    fn empty_and_numeric_fail() {
        assert!(detect_language("").is_err());
        assert!(detect_language("   ").is_err());
        assert!(detect_language("123 !!").is_err());
    }

    #[test]
    fn undecidable_accented_latin_fails() {
        assert!(detect_language("ñá").is_err());
    }

    #[test]
    fn detector_falls_back() {
        let detector = LanguageDetector::default();
        let detection = detector.detect("42");
        assert_eq!(detection.code, "en");
        assert!(!detection.detected);
        assert!(detection.is_english());
    }

    #[test]
    fn detector_custom_fallback() {
        let detector = LanguageDetector::new("fr");
        assert_eq!(detector.detect("").code, "fr");
        assert_eq!(detector.fallback(), "fr");
    }

    #[test]
    fn detector_reports_success() {
        let detector = LanguageDetector::default();
        let detection = detector.detect("मुझे सिरदर्द है");
        assert_eq!(detection.code, "hi");
        assert!(detection.detected);
    }
}
