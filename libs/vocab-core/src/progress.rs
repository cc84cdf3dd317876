//! Per-word progress tracking.

use tracing::debug;

use crate::types::{ProgressMap, ProgressRecord};

/// Number of rows returned by [`ProgressTracker::summary`].
pub const SUMMARY_LIMIT: usize = 50;

/// Owns every word's progress record.
///
/// Records are created lazily on first use and only removed by [`clear`].
///
/// [`clear`]: ProgressTracker::clear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    records: ProgressMap,
}

impl ProgressTracker {
    pub fn new(records: ProgressMap) -> Self {
        Self { records }
    }

    /// Count one graded attempt for `word`. Leaves `known` untouched.
    pub fn record_attempt(&mut self, word: &str, was_correct: bool) {
        let record = self.entry(word);
        record.seen += 1;
        if was_correct {
            record.correct += 1;
        } else {
            record.incorrect += 1;
        }
        debug!(word, was_correct, seen = record.seen, "recorded attempt");
    }

    /// Set the known flag for `word`. Leaves the counters untouched.
    pub fn set_known(&mut self, word: &str, known: bool) {
        self.entry(word).known = known;
        debug!(word, known, "set known flag");
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, word: &str) -> Option<&ProgressRecord> {
        self.records.get(word)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first [`SUMMARY_LIMIT`] records, in the order words were first tracked.
    pub fn summary(&self) -> Vec<(&str, ProgressRecord)> {
        self.records
            .iter()
            .take(SUMMARY_LIMIT)
            .map(|(word, record)| (word.as_str(), *record))
            .collect()
    }

    pub fn records(&self) -> &ProgressMap {
        &self.records
    }

    fn entry(&mut self, word: &str) -> &mut ProgressRecord {
        self.records.entry(word.to_string()).or_default()
    }
}
