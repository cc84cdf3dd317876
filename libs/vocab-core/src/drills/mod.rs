//! Single-word drills over a snapshot of the word bank.
//!
//! Each drill is idle until started, active afterwards, and returns to idle
//! when stopped. Starting again discards whatever was in flight.

pub mod flashcards;
pub mod rapid;
pub mod sprint;
pub mod typed;

pub use flashcards::Flashcards;
pub use rapid::RapidReveal;
pub use sprint::{Sprint, SprintReveal, SprintStatus};
pub use typed::{TypedOutcome, TypedTranslation};

use crate::types::WordEntry;

/// Circular cursor over a fixed word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDeck {
    words: Vec<WordEntry>,
    index: usize,
}

impl WordDeck {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self { words, index: 0 }
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.words.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// Move forward, wrapping to the first word after the last.
    pub fn next(&mut self) {
        if !self.words.is_empty() {
            self.index = (self.index + 1) % self.words.len();
        }
    }

    /// Move back, wrapping to the last word before the first.
    pub fn prev(&mut self) {
        if !self.words.is_empty() {
            let len = self.words.len();
            self.index = (self.index + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|w| WordEntry {
                word: w.to_string(),
                translation: format!("{w}-en"),
                difficulty: "easy".to_string(),
            })
            .collect()
    }

    #[test]
    fn next_wraps_around() {
        let mut deck = WordDeck::new(entries(&["a", "b", "c"]));
        deck.next();
        deck.next();
        assert_eq!(deck.current().unwrap().word, "c");
        deck.next();
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn prev_wraps_around() {
        let mut deck = WordDeck::new(entries(&["a", "b", "c"]));
        deck.prev();
        assert_eq!(deck.current().unwrap().word, "c");
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut deck = WordDeck::new(entries(&["a", "b", "c", "d", "e"]));
        for start in 0..deck.len() {
            while deck.index() != start {
                deck.next();
            }
            for _ in 0..deck.len() {
                deck.next();
            }
            assert_eq!(deck.index(), start);
        }
    }

    #[test]
    fn empty_deck_stays_put() {
        let mut deck = WordDeck::new(Vec::new());
        deck.next();
        deck.prev();
        assert_eq!(deck.index(), 0);
        assert!(deck.current().is_none());
    }
}
