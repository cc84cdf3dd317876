//! Application state shared by every practice mode.
//!
//! [`App`] owns the store, the derived word index, the progress tracker,
//! each controller and the timer queue. The presentation layer calls one
//! method per user action and [`App::advance`] as real time passes. Any
//! method that changes the bank or progress flushes both to storage
//! before it returns.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::{error, info};

use crate::drills::{
    Flashcards, RapidReveal, Sprint, SprintReveal, TypedOutcome, TypedTranslation,
};
use crate::error::{Result, StoreError};
use crate::progress::ProgressTracker;
use crate::session::{BlankId, GradeReport, PracticeSession};
use crate::store::{KeyValueStore, Store};
use crate::timer::TimerQueue;
use crate::types::{PracticeSettings, SentenceBank, WordEntry};
use crate::word_bank::WordBankIndex;

/// The learner's whole application state, persisted through `B`.
pub struct App<B: KeyValueStore> {
    store: Store<B>,
    index: WordBankIndex,
    progress: ProgressTracker,
    settings: PracticeSettings,
    session: PracticeSession,
    flashcards: Flashcards,
    rapid: RapidReveal,
    typed: TypedTranslation,
    sprint: Sprint,
    answer_chips: Vec<WordEntry>,
    timers: TimerQueue,
    rng: StdRng,
}

impl<B: KeyValueStore> App<B> {
    /// Load state from `backend` with an entropy-seeded shuffle source.
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    /// Load state from `backend` using `rng` for every random choice.
    pub fn with_rng(backend: B, rng: StdRng) -> Self {
        let (store, progress) = Store::load(backend);
        let mut app = Self {
            store,
            index: WordBankIndex::default(),
            progress: ProgressTracker::new(progress),
            settings: PracticeSettings::default(),
            session: PracticeSession::new(),
            flashcards: Flashcards::new(),
            rapid: RapidReveal::new(),
            typed: TypedTranslation::new(),
            sprint: Sprint::new(),
            answer_chips: Vec::new(),
            timers: TimerQueue::new(),
            rng,
        };
        app.apply_settings();
        app.rebuild();
        app
    }

    pub fn bank(&self) -> &SentenceBank {
        self.store.bank()
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn index(&self) -> &WordBankIndex {
        &self.index
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    pub fn flashcards(&self) -> &Flashcards {
        &self.flashcards
    }

    pub fn rapid(&self) -> &RapidReveal {
        &self.rapid
    }

    pub fn typed(&self) -> &TypedTranslation {
        &self.typed
    }

    pub fn sprint(&self) -> &Sprint {
        &self.sprint
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Target words for the answer strip, in shuffled order.
    pub fn answer_chips(&self) -> &[WordEntry] {
        &self.answer_chips
    }

    pub fn set_settings(&mut self, settings: PracticeSettings) {
        self.settings = settings;
        self.apply_settings();
    }

    // Bank and progress maintenance

    /// Replace the bank from JSON text, as typed in the editor or read from
    /// an imported file.
    pub fn replace_bank_from_str(&mut self, text: &str) -> Result<()> {
        self.store.replace_bank_from_str(text)?;
        self.after_bank_change();
        Ok(())
    }

    /// Replace the bank from an already-parsed JSON value.
    pub fn replace_bank(&mut self, candidate: Value) -> Result<()> {
        self.store.replace_bank(candidate)?;
        self.after_bank_change();
        Ok(())
    }

    pub fn reset_to_sample(&mut self) {
        self.store.reset_to_sample();
        self.after_bank_change();
    }

    /// Forget all progress. The bank is untouched.
    pub fn clear_progress(&mut self) {
        self.progress.clear();
        info!("cleared progress");
        self.flush();
    }

    pub fn export_bank(&self) -> std::result::Result<String, StoreError> {
        self.store.export_bank()
    }

    /// Re-derive everything that depends on the bank.
    ///
    /// Rebuilds the word index, hands active drills a fresh word list and
    /// refreshes the answer strip.
    pub fn rebuild(&mut self) {
        self.index = WordBankIndex::build(self.store.bank());
        let words = self.index.words();
        if self.flashcards.is_active() {
            self.flashcards.start(words.clone());
        }
        if self.rapid.is_active() {
            self.rapid.start(words.clone(), &mut self.timers);
        }
        if self.typed.is_active() {
            self.typed.start(words.clone());
        }
        if self.sprint.is_active() {
            self.sprint.replace_words(words, &mut self.rng);
        }
        self.refresh_answer_chips();
    }

    // Fill-in-the-blank session

    /// Start a session of `count` sentences; zero means the configured size.
    pub fn start_session(&mut self, count: usize) {
        let count = if count == 0 {
            self.settings.session_size
        } else {
            count
        };
        self.session.start(self.store.bank(), count, &mut self.rng);
        self.refresh_answer_chips();
    }

    pub fn set_answer(&mut self, id: BlankId, input: impl Into<String>) -> bool {
        self.session.set_answer(id, input)
    }

    pub fn grade_session(&mut self) -> GradeReport {
        let report = self.session.grade(&mut self.progress);
        self.flush();
        report
    }

    pub fn review_missed(&mut self) -> bool {
        let started = self.session.review_missed();
        if started {
            self.refresh_answer_chips();
        }
        started
    }

    // Flashcards

    pub fn start_flashcards(&mut self) {
        self.flashcards.start(self.index.words());
    }

    pub fn flip_card(&mut self) {
        self.flashcards.flip();
    }

    pub fn next_card(&mut self) {
        self.flashcards.next();
    }

    pub fn prev_card(&mut self) {
        self.flashcards.prev();
    }

    pub fn mark_known(&mut self) -> bool {
        let marked = self.flashcards.mark_known(&mut self.progress);
        if marked {
            self.flush();
        }
        marked
    }

    pub fn mark_review(&mut self) -> bool {
        let marked = self.flashcards.mark_review(&mut self.progress);
        if marked {
            self.flush();
        }
        marked
    }

    // Rapid reveal

    pub fn start_rapid(&mut self) {
        self.rapid.start(self.index.words(), &mut self.timers);
    }

    pub fn rapid_reveal(&mut self) -> Option<WordEntry> {
        self.rapid.reveal(&mut self.timers).cloned()
    }

    pub fn rapid_next(&mut self) {
        self.rapid.next();
    }

    pub fn set_rapid_loop(&mut self, enabled: bool) {
        self.settings.rapid_loop = enabled;
        self.rapid.set_loop(enabled, &mut self.timers);
    }

    pub fn set_rapid_delay_ms(&mut self, delay_ms: u64) {
        self.settings.rapid_delay_ms = delay_ms;
        self.rapid.set_delay_ms(delay_ms);
    }

    // Typed translation

    pub fn start_typed(&mut self) {
        self.typed.start(self.index.words());
    }

    pub fn submit_translation(&mut self, input: &str) -> Option<TypedOutcome> {
        let outcome = self.typed.submit(input, &mut self.progress);
        if outcome.is_some() {
            self.flush();
        }
        outcome
    }

    // Sprint

    /// Start a sprint of `seconds`; zero means the configured length.
    pub fn start_sprint(&mut self, seconds: u32) {
        let seconds = if seconds == 0 {
            self.settings.sprint_seconds
        } else {
            seconds
        };
        self.sprint
            .start(self.index.words(), seconds, &mut self.timers, &mut self.rng);
    }

    pub fn sprint_reveal(&mut self) -> Option<SprintReveal> {
        let reveal = self.sprint.reveal(&mut self.progress, &mut self.rng);
        if reveal.is_some() && self.settings.sprint_sync {
            self.flush();
        }
        reveal
    }

    pub fn set_sprint_sync(&mut self, sync: bool) {
        self.settings.sprint_sync = sync;
        self.sprint.set_sync(sync);
    }

    /// Stop every drill and cancel their timers.
    pub fn stop_drills(&mut self) {
        self.flashcards.stop();
        self.rapid.stop(&mut self.timers);
        self.typed.stop();
        self.sprint.stop(&mut self.timers);
    }

    // Time

    /// Let `by` elapse, firing every timer that falls due in order.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.timers.now() + by;
        while let Some(handle) = self.timers.pop_due(deadline) {
            if self.rapid.on_timer(handle, &mut self.timers) {
                continue;
            }
            self.sprint.on_tick(handle, &mut self.timers);
        }
        self.timers.advance_to(deadline);
    }

    fn apply_settings(&mut self) {
        self.rapid.set_delay_ms(self.settings.rapid_delay_ms);
        self.rapid.set_loop(self.settings.rapid_loop, &mut self.timers);
        self.sprint.set_sync(self.settings.sprint_sync);
    }

    fn after_bank_change(&mut self) {
        self.flush();
        self.rebuild();
    }

    fn refresh_answer_chips(&mut self) {
        let source = if self.session.items().is_empty() {
            self.index.clone()
        } else {
            self.session.word_bank()
        };
        self.answer_chips = source.shuffled(&mut self.rng);
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.save(self.progress.records()) {
            error!(error = %e, "failed to persist state");
        }
    }
}
