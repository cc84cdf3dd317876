//! Rapid reveal: show a word, reveal its translation, optionally auto-advance.

use std::time::Duration;

use tracing::debug;

use super::WordDeck;
use crate::timer::{TimerHandle, TimerQueue};
use crate::types::{WordEntry, MIN_RAPID_DELAY_MS};

#[derive(Debug, Clone)]
pub struct RapidReveal {
    deck: WordDeck,
    active: bool,
    revealed: bool,
    loop_enabled: bool,
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Default for RapidReveal {
    fn default() -> Self {
        Self {
            deck: WordDeck::default(),
            active: false,
            revealed: false,
            loop_enabled: false,
            delay: Duration::from_millis(1000),
            pending: None,
        }
    }
}

impl RapidReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over `words`, cancelling any pending advance.
    pub fn start(&mut self, words: Vec<WordEntry>, timers: &mut TimerQueue) {
        self.cancel_pending(timers);
        debug!(words = words.len(), "started rapid reveal");
        self.deck = WordDeck::new(words);
        self.active = true;
        self.revealed = false;
    }

    pub fn stop(&mut self, timers: &mut TimerQueue) {
        self.cancel_pending(timers);
        self.active = false;
        self.revealed = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.deck.current()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Set the auto-advance delay, floored at [`MIN_RAPID_DELAY_MS`].
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay = Duration::from_millis(delay_ms.max(MIN_RAPID_DELAY_MS));
    }

    /// Turn the auto-advance loop on or off. Turning it off cancels the
    /// pending advance.
    pub fn set_loop(&mut self, enabled: bool, timers: &mut TimerQueue) {
        self.loop_enabled = enabled;
        if !enabled {
            self.cancel_pending(timers);
        }
    }

    /// Reveal the current translation.
    ///
    /// With the loop on, the advance timer restarts from now.
    pub fn reveal(&mut self, timers: &mut TimerQueue) -> Option<&WordEntry> {
        if !self.active || self.deck.is_empty() {
            return None;
        }
        self.revealed = true;
        if self.loop_enabled {
            self.arm(timers);
        }
        self.deck.current()
    }

    /// Show the next word.
    pub fn next(&mut self) {
        self.deck.next();
        self.revealed = false;
    }

    /// Handle a fired timer. Returns false if the handle is not ours.
    pub fn on_timer(&mut self, handle: TimerHandle, timers: &mut TimerQueue) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        self.next();
        if self.loop_enabled {
            self.arm(timers);
        }
        true
    }

    fn arm(&mut self, timers: &mut TimerQueue) {
        self.cancel_pending(timers);
        self.pending = Some(timers.schedule_once(self.delay));
    }

    fn cancel_pending(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}
