//! Core types for the vocabulary trainer.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shortest delay accepted for the rapid-reveal auto-advance loop.
pub const MIN_RAPID_DELAY_MS: u64 = 200;

/// A practice sentence with its target words.
///
/// Fields are read leniently: a missing, `null` or wrongly typed value
/// becomes its empty default instead of rejecting the record, so
/// hand-edited banks always load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sentence: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub test_words: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sentence_en: String,
    /// Parallel to `test_words`; may be shorter.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub test_words_en: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub difficulty: String,
}

impl Sentence {
    /// Iterate over `(word, translation)` pairs at parallel positions.
    ///
    /// Missing translations come back as `""`.
    pub fn word_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.test_words.iter().enumerate().map(|(i, word)| {
            let translation = self.test_words_en.get(i).map(String::as_str).unwrap_or("");
            (word.as_str(), translation)
        })
    }

    /// Single-word pseudo-sentence used to drill a previously missed word.
    pub fn drill_for(word: &str, translation: &str) -> Self {
        Self {
            sentence: word.to_string(),
            test_words: vec![word.to_string()],
            sentence_en: translation.to_string(),
            test_words_en: vec![translation.to_string()],
            difficulty: String::new(),
        }
    }
}

/// The full, ordered collection of practice sentences.
pub type SentenceBank = Vec<Sentence>;

/// Derived lookup entry for a single target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub translation: String,
    pub difficulty: String,
}

/// Per-word learning counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub seen: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incorrect: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known: bool,
}

/// Progress records keyed by word, in the order the words were first graded.
pub type ProgressMap = IndexMap<String, ProgressRecord>;

/// A blank the learner got wrong, kept for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedWord {
    pub word: String,
    pub translation: String,
}

/// Practice settings chosen by the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeSettings {
    /// Sentences per session when the requested count is zero.
    pub session_size: usize,
    pub rapid_delay_ms: u64,
    pub rapid_loop: bool,
    /// Sprint length when the requested duration is zero.
    pub sprint_seconds: u32,
    /// Record sprint reveals as correct attempts.
    pub sprint_sync: bool,
    pub show_translation: bool,
    pub show_word_bank: bool,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            session_size: 10,
            rapid_delay_ms: 1000,
            rapid_loop: false,
            sprint_seconds: 30,
            sprint_sync: false,
            show_translation: true,
            show_word_bank: false,
        }
    }
}

fn string_or_empty(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(string_or_empty)
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(string_or_empty).collect(),
        _ => Vec::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PracticeSettings {
    /// Rapid-reveal delay with the minimum floor applied.
    pub fn effective_rapid_delay_ms(&self) -> u64 {
        self.rapid_delay_ms.max(MIN_RAPID_DELAY_MS)
    }
}
