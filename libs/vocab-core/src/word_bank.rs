//! Word bank index derived from the sentence bank.

use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Sentence, WordEntry};

/// Deduplicated `word -> entry` lookup built from a set of sentences.
///
/// Entries keep the order in which their word was first encountered. When
/// a word appears in several sentences, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBankIndex {
    entries: IndexMap<String, WordEntry>,
}

impl WordBankIndex {
    /// Build the index from sentences in bank order.
    pub fn build(sentences: &[Sentence]) -> Self {
        let mut entries = IndexMap::new();
        for sentence in sentences {
            for (word, translation) in sentence.word_pairs() {
                if word.is_empty() {
                    continue;
                }
                entries.entry(word.to_string()).or_insert_with(|| WordEntry {
                    word: word.to_string(),
                    translation: translation.to_string(),
                    difficulty: sentence.difficulty.clone(),
                });
            }
        }
        Self { entries }
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.values()
    }

    /// Snapshot of the word list, for drills that must not follow later edits.
    pub fn words(&self) -> Vec<WordEntry> {
        self.entries.values().cloned().collect()
    }

    /// Entries in random order, as shown in the answer chip strip.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WordEntry> {
        let mut words = self.words();
        words.shuffle(rng);
        words
    }
}
