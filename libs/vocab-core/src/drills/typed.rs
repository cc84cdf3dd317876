//! Typed translation: type the translation of the shown word.

use tracing::debug;

use super::WordDeck;
use crate::matching::compare_answers;
use crate::progress::ProgressTracker;
use crate::types::WordEntry;

/// Feedback for a submitted translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedOutcome {
    pub word: String,
    pub expected: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TypedTranslation {
    deck: WordDeck,
    active: bool,
    last: Option<TypedOutcome>,
}

impl TypedTranslation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, words: Vec<WordEntry>) {
        debug!(words = words.len(), "started typed translation");
        self.deck = WordDeck::new(words);
        self.active = true;
        self.last = None;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.deck.current()
    }

    /// Feedback for the previous submission.
    pub fn last_outcome(&self) -> Option<&TypedOutcome> {
        self.last.as_ref()
    }

    /// Grade `input` against the current word's translation, record the
    /// attempt, and move on to the next word whatever the result.
    pub fn submit(&mut self, input: &str, progress: &mut ProgressTracker) -> Option<TypedOutcome> {
        if !self.active {
            return None;
        }
        let entry = self.deck.current()?;
        let correct = compare_answers(input, &entry.translation).is_correct;
        progress.record_attempt(&entry.word, correct);

        let outcome = TypedOutcome {
            word: entry.word.clone(),
            expected: entry.translation.clone(),
            correct,
        };
        self.deck.next();
        self.last = Some(outcome.clone());
        Some(outcome)
    }
}
