//! Timed sprint: reveal as many random words as possible before time runs out.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::progress::ProgressTracker;
use crate::timer::{TimerHandle, TimerQueue};
use crate::types::WordEntry;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SprintStatus {
    #[default]
    Idle,
    Running,
    Finished,
}

/// A revealed word and the score after revealing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintReveal {
    pub word: String,
    pub translation: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Sprint {
    words: Vec<WordEntry>,
    current: Option<usize>,
    score: u32,
    remaining: u32,
    sync: bool,
    status: SprintStatus,
    tick: Option<TimerHandle>,
}

impl Sprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown of `seconds`, discarding any sprint in flight.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        words: Vec<WordEntry>,
        seconds: u32,
        timers: &mut TimerQueue,
        rng: &mut R,
    ) {
        self.cancel_tick(timers);
        debug!(words = words.len(), seconds, "started sprint");
        self.words = words;
        self.score = 0;
        self.remaining = seconds;
        self.pick(rng);

        if seconds == 0 {
            self.status = SprintStatus::Finished;
        } else {
            self.status = SprintStatus::Running;
            self.tick = Some(timers.schedule_repeating(TICK));
        }
    }

    pub fn stop(&mut self, timers: &mut TimerQueue) {
        self.cancel_tick(timers);
        self.status = SprintStatus::Idle;
        self.current = None;
    }

    /// Swap in a new word list and draw from it, keeping the countdown and
    /// score.
    pub fn replace_words<R: Rng + ?Sized>(&mut self, words: Vec<WordEntry>, rng: &mut R) {
        debug!(words = words.len(), "refreshed sprint words");
        self.words = words;
        self.pick(rng);
    }

    /// Whether reveals are recorded in progress as correct attempts.
    pub fn set_sync(&mut self, sync: bool) {
        self.sync = sync;
    }

    pub fn status(&self) -> SprintStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SprintStatus::Running
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.current.and_then(|i| self.words.get(i))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The score once the countdown has reached zero.
    pub fn final_score(&self) -> Option<u32> {
        (self.status == SprintStatus::Finished).then_some(self.score)
    }

    /// Reveal the current word, count it, and draw the next one.
    ///
    /// Does nothing unless the sprint is running.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        progress: &mut ProgressTracker,
        rng: &mut R,
    ) -> Option<SprintReveal> {
        if self.status != SprintStatus::Running {
            return None;
        }
        let entry = self.current()?.clone();
        self.score += 1;
        if self.sync {
            progress.record_attempt(&entry.word, true);
        }
        self.pick(rng);

        Some(SprintReveal {
            word: entry.word,
            translation: entry.translation,
            score: self.score,
        })
    }

    /// Handle a fired timer. Returns false if the handle is not ours.
    pub fn on_tick(&mut self, handle: TimerHandle, timers: &mut TimerQueue) -> bool {
        if self.tick != Some(handle) {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cancel_tick(timers);
            self.status = SprintStatus::Finished;
            debug!(score = self.score, "sprint finished");
        }
        true
    }

    fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = if self.words.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.words.len()))
        };
    }

    fn cancel_tick(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.tick.take() {
            timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drills::tests::entries;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tick_for(sprint: &mut Sprint, timers: &mut TimerQueue, by: Duration) {
        let deadline = timers.now() + by;
        while let Some(handle) = timers.pop_due(deadline) {
            sprint.on_tick(handle, timers);
        }
        timers.advance_to(deadline);
    }

    #[test]
    fn one_second_sprint_with_one_reveal() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.start(entries(&["appel", "school"]), 1, &mut timers, &mut rng);

        let reveal = sprint.reveal(&mut progress, &mut rng).unwrap();
        assert_eq!(reveal.score, 1);
        assert_eq!(reveal.translation, format!("{}-en", reveal.word));

        tick_for(&mut sprint, &mut timers, Duration::from_secs(1));
        assert_eq!(sprint.remaining(), 0);
        assert_eq!(sprint.final_score(), Some(1));
        assert_eq!(timers.pending_count(), 0);

        assert!(sprint.reveal(&mut progress, &mut rng).is_none());
        tick_for(&mut sprint, &mut timers, Duration::from_secs(3));
        assert_eq!(sprint.remaining(), 0);
        assert_eq!(sprint.score(), 1);
    }

    #[test]
    fn countdown_decrements_each_second() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut sprint = Sprint::new();
        sprint.start(entries(&["a"]), 5, &mut timers, &mut rng);

        tick_for(&mut sprint, &mut timers, Duration::from_millis(2500));
        assert_eq!(sprint.remaining(), 3);
        assert!(sprint.is_active());
        assert_eq!(sprint.final_score(), None);
    }

    #[test]
    fn sync_records_correct_attempts() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.set_sync(true);
        sprint.start(entries(&["appel"]), 30, &mut timers, &mut rng);

        sprint.reveal(&mut progress, &mut rng);
        sprint.reveal(&mut progress, &mut rng);
        let record = progress.get("appel").unwrap();
        assert_eq!((record.seen, record.correct, record.incorrect), (2, 2, 0));
    }

    #[test]
    fn without_sync_progress_is_untouched() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.start(entries(&["appel"]), 30, &mut timers, &mut rng);

        assert_eq!(sprint.reveal(&mut progress, &mut rng).unwrap().score, 1);
        assert!(progress.is_empty());
    }

    #[test]
    fn restart_cancels_previous_countdown() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.start(entries(&["a", "b"]), 10, &mut timers, &mut rng);
        sprint.reveal(&mut progress, &mut rng);
        tick_for(&mut sprint, &mut timers, Duration::from_secs(4));

        sprint.start(entries(&["a", "b"]), 10, &mut timers, &mut rng);
        assert_eq!(timers.pending_count(), 1);
        assert_eq!(sprint.score(), 0);

        tick_for(&mut sprint, &mut timers, Duration::from_secs(1));
        assert_eq!(sprint.remaining(), 9);
    }

    #[test]
    fn empty_word_list_counts_down_without_reveals() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(6);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.start(Vec::new(), 2, &mut timers, &mut rng);

        assert!(sprint.reveal(&mut progress, &mut rng).is_none());
        tick_for(&mut sprint, &mut timers, Duration::from_secs(2));
        assert_eq!(sprint.final_score(), Some(0));
    }

    #[test]
    fn replaced_words_keep_countdown_running() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut progress = ProgressTracker::default();
        let mut sprint = Sprint::new();
        sprint.set_sync(true);
        sprint.start(entries(&["appel"]), 10, &mut timers, &mut rng);
        sprint.reveal(&mut progress, &mut rng);
        tick_for(&mut sprint, &mut timers, Duration::from_secs(2));

        sprint.replace_words(entries(&["fiets"]), &mut rng);
        assert_eq!(sprint.current().unwrap().word, "fiets");
        assert_eq!(sprint.reveal(&mut progress, &mut rng).unwrap().word, "fiets");
        assert_eq!(sprint.score(), 2);
        assert_eq!(sprint.remaining(), 8);
        assert_eq!(timers.pending_count(), 1);

        sprint.replace_words(Vec::new(), &mut rng);
        assert!(sprint.reveal(&mut progress, &mut rng).is_none());
        assert_eq!(progress.len(), 2);
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut sprint = Sprint::new();
        sprint.start(entries(&["a"]), 10, &mut timers, &mut rng);
        sprint.stop(&mut timers);
        assert_eq!(sprint.status(), SprintStatus::Idle);
        assert_eq!(timers.pending_count(), 0);
    }
}
