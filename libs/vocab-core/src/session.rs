//! Fill-in-the-blank practice sessions.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::matching::compare_answers;
use crate::progress::ProgressTracker;
use crate::types::{MissedWord, Sentence};
use crate::word_bank::WordBankIndex;

/// Position of a blank: the session item and the target word's slot in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId {
    pub item: usize,
    pub slot: usize,
}

/// An input placeholder standing in for a target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blank {
    pub id: BlankId,
    pub word: String,
    pub translation: String,
}

/// A piece of a rendered sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Blank(Blank),
}

/// Split `sentence` into text and blanks.
///
/// Each target word blanks its first whole-word, case-insensitive match in
/// the text that is still unblanked. Later occurrences stay as text, and a
/// word with no match produces no blank.
pub fn build_blanks(sentence: &Sentence, item: usize) -> Vec<Segment> {
    let mut segments = vec![Segment::Text(sentence.sentence.clone())];

    for (slot, (word, translation)) in sentence.word_pairs().enumerate() {
        if word.is_empty() {
            continue;
        }
        let Some(pattern) = whole_word_pattern(word) else {
            continue;
        };
        let blank = Blank {
            id: BlankId { item, slot },
            word: word.to_string(),
            translation: translation.to_string(),
        };
        replace_first(&mut segments, &pattern, blank);
    }

    segments
}

fn whole_word_pattern(word: &str) -> Option<Regex> {
    let source = format!(r"\b{}\b", regex::escape(word));
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!(word, error = %e, "cannot build blank pattern");
            None
        }
    }
}

fn replace_first(segments: &mut Vec<Segment>, pattern: &Regex, blank: Blank) {
    for pos in 0..segments.len() {
        let Segment::Text(text) = &segments[pos] else {
            continue;
        };
        let Some(found) = pattern.find(text) else {
            continue;
        };

        let before = &text[..found.start()];
        let after = &text[found.end()..];
        let mut replacement = Vec::with_capacity(3);
        if !before.is_empty() {
            replacement.push(Segment::Text(before.to_string()));
        }
        replacement.push(Segment::Blank(blank));
        if !after.is_empty() {
            replacement.push(Segment::Text(after.to_string()));
        }
        segments.splice(pos..=pos, replacement);
        return;
    }
}

/// Items and missed words of the running session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub items: Vec<Sentence>,
    pub missed: Vec<MissedWord>,
}

/// Outcome of grading one blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankResult {
    pub id: BlankId,
    pub word: String,
    pub correct: bool,
}

/// Outcome of grading every blank in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeReport {
    pub results: Vec<BlankResult>,
    pub missed: usize,
}

/// Controller for the fill-in-the-blank mode.
#[derive(Debug, Clone, Default)]
pub struct PracticeSession {
    state: Option<SessionState>,
    rendered: Vec<Vec<Segment>>,
    answers: HashMap<BlankId, String>,
}

impl PracticeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over up to `count` randomly chosen sentences.
    ///
    /// Any session in progress is discarded.
    pub fn start<R: Rng + ?Sized>(&mut self, bank: &[Sentence], count: usize, rng: &mut R) {
        let mut pool = bank.to_vec();
        pool.shuffle(rng);
        pool.truncate(count.min(bank.len()));
        debug!(requested = count, selected = pool.len(), "started practice session");
        self.install(SessionState {
            items: pool,
            missed: Vec::new(),
        });
    }

    /// Restart with one single-word item per missed word.
    ///
    /// Returns false, leaving the session as it was, if nothing was missed.
    pub fn review_missed(&mut self) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        if state.missed.is_empty() {
            return false;
        }
        let items = state
            .missed
            .iter()
            .map(|m| Sentence::drill_for(&m.word, &m.translation))
            .collect();
        debug!(count = state.missed.len(), "reviewing missed words");
        self.install(SessionState {
            items,
            missed: Vec::new(),
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn items(&self) -> &[Sentence] {
        self.state.as_ref().map(|s| s.items.as_slice()).unwrap_or(&[])
    }

    pub fn missed(&self) -> &[MissedWord] {
        self.state.as_ref().map(|s| s.missed.as_slice()).unwrap_or(&[])
    }

    /// Rendered segments of item `item`.
    pub fn segments(&self, item: usize) -> Option<&[Segment]> {
        self.rendered.get(item).map(Vec::as_slice)
    }

    /// Every blank across all items, in display order.
    pub fn blanks(&self) -> impl Iterator<Item = &Blank> {
        self.rendered.iter().flatten().filter_map(|segment| match segment {
            Segment::Blank(blank) => Some(blank),
            Segment::Text(_) => None,
        })
    }

    /// Store the learner's input for a blank. Returns false for an unknown blank.
    pub fn set_answer(&mut self, id: BlankId, input: impl Into<String>) -> bool {
        if !self.blanks().any(|b| b.id == id) {
            return false;
        }
        self.answers.insert(id, input.into());
        true
    }

    pub fn answer(&self, id: BlankId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// Grade every blank and record one attempt per blank in `progress`.
    ///
    /// Unanswered blanks count as empty input. The missed list is rebuilt
    /// from scratch on each call.
    pub fn grade(&mut self, progress: &mut ProgressTracker) -> GradeReport {
        let mut results = Vec::new();
        let mut missed = Vec::new();

        for blank in self.blanks() {
            let typed = self.answers.get(&blank.id).map(String::as_str).unwrap_or("");
            let correct = compare_answers(typed, &blank.word).is_correct;
            progress.record_attempt(&blank.word, correct);
            if !correct {
                missed.push(MissedWord {
                    word: blank.word.clone(),
                    translation: blank.translation.clone(),
                });
            }
            results.push(BlankResult {
                id: blank.id,
                word: blank.word.clone(),
                correct,
            });
        }

        let report = GradeReport {
            missed: missed.len(),
            results,
        };
        if let Some(state) = &mut self.state {
            state.missed = missed;
        }
        debug!(blanks = report.results.len(), missed = report.missed, "graded session");
        report
    }

    /// Deduplicated target words of the current items.
    pub fn word_bank(&self) -> WordBankIndex {
        WordBankIndex::build(self.items())
    }

    fn install(&mut self, state: SessionState) {
        self.rendered = state
            .items
            .iter()
            .enumerate()
            .map(|(item, sentence)| build_blanks(sentence, item))
            .collect();
        self.answers.clear();
        self.state = Some(state);
    }
}
