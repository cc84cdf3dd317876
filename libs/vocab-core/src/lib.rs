//! Core library of the vocabulary trainer.
//!
//! Provides:
//! - Sentence bank storage with sample-data fallback
//! - Word bank index derived from the sentences
//! - Per-word progress tracking
//! - Fill-in-the-blank practice sessions
//! - Flashcard, rapid-reveal, typed-translation and sprint drills
//! - A virtual-time timer queue and the [`App`] state object tying it together

pub mod app;
pub mod drills;
pub mod error;
pub mod matching;
pub mod progress;
pub mod session;
pub mod store;
pub mod timer;
pub mod types;
pub mod word_bank;

pub use app::App;
pub use drills::{
    Flashcards, RapidReveal, Sprint, SprintReveal, SprintStatus, TypedOutcome, TypedTranslation,
    WordDeck,
};
pub use error::{Result, StoreError, ValidationError};
pub use matching::{compare_answers, normalize_answer, MatchResult};
pub use progress::{ProgressTracker, SUMMARY_LIMIT};
pub use session::{build_blanks, Blank, BlankId, BlankResult, GradeReport, PracticeSession, Segment, SessionState};
pub use store::{pretty_print, sample_bank, FileStore, KeyValueStore, MemoryStore, Store};
pub use timer::{TimerHandle, TimerQueue};
pub use types::{
    MissedWord, PracticeSettings, ProgressMap, ProgressRecord, Sentence, SentenceBank, WordEntry,
    MIN_RAPID_DELAY_MS,
};
pub use word_bank::WordBankIndex;
