//! Flashcards: flip a card to see its translation, mark it known or for review.

use tracing::debug;

use super::WordDeck;
use crate::progress::ProgressTracker;
use crate::types::WordEntry;

#[derive(Debug, Clone, Default)]
pub struct Flashcards {
    deck: WordDeck,
    active: bool,
    flipped: bool,
}

impl Flashcards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over `words` at the first card.
    pub fn start(&mut self, words: Vec<WordEntry>) {
        debug!(cards = words.len(), "started flashcards");
        self.deck = WordDeck::new(words);
        self.active = true;
        self.flipped = false;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.flipped = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.deck.current()
    }

    /// One-based position and deck size, for the "(i/n)" caption.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.deck.index() + 1, self.deck.len()))
    }

    /// Toggle whether the translation side is shown.
    pub fn flip(&mut self) {
        if self.active {
            self.flipped = !self.flipped;
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn next(&mut self) {
        if self.active {
            self.deck.next();
        }
    }

    pub fn prev(&mut self) {
        if self.active {
            self.deck.prev();
        }
    }

    /// First letter of the current translation, or `?` if it is empty.
    pub fn hint(&self) -> Option<char> {
        self.current()
            .map(|entry| entry.translation.chars().next().unwrap_or('?'))
    }

    /// Mark the current word known. Returns false when stopped or there is
    /// no card.
    pub fn mark_known(&self, progress: &mut ProgressTracker) -> bool {
        self.mark(progress, true)
    }

    /// Mark the current word for review. Returns false when stopped or there
    /// is no card.
    pub fn mark_review(&self, progress: &mut ProgressTracker) -> bool {
        self.mark(progress, false)
    }

    fn mark(&self, progress: &mut ProgressTracker, known: bool) -> bool {
        if !self.active {
            return false;
        }
        match self.current() {
            Some(entry) => {
                progress.set_known(&entry.word, known);
                true
            }
            None => false,
        }
    }
}
