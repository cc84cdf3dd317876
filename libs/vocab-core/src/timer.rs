//! Cancellable timers on a virtual clock.
//!
//! The queue never sleeps. Whoever drives the application moves the clock
//! forward with [`TimerQueue::pop_due`] / [`TimerQueue::advance_to`] and
//! dispatches each fired handle to the controller that owns it.

use std::time::Duration;

use tracing::debug;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    handle: TimerHandle,
    due: Duration,
    interval: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    scheduled: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        self.schedule(delay, None)
    }

    /// Fire every `interval`, starting one interval from now.
    pub fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        // A zero interval would fire forever within a single advance.
        let interval = interval.max(Duration::from_millis(1));
        self.schedule(interval, Some(interval))
    }

    /// Cancel a timer. Returns false if it had already fired or been cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.handle != handle);
        let cancelled = self.scheduled.len() != before;
        if cancelled {
            debug!(?handle, "cancelled timer");
        }
        cancelled
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.scheduled.iter().any(|s| s.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are
    /// re-armed one interval later; one-shot timers are removed. Timers due
    /// at the same instant fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerHandle> {
        let (pos, _) = self
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= deadline)
            .min_by_key(|(_, s)| (s.due, s.handle.0))?;

        let fired = self.scheduled[pos].clone();
        self.now = self.now.max(fired.due);
        match fired.interval {
            Some(interval) => self.scheduled[pos].due = fired.due + interval,
            None => {
                self.scheduled.remove(pos);
            }
        }
        Some(fired.handle)
    }

    /// Move the clock to `deadline` without firing anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn schedule(&mut self, delay: Duration, interval: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.scheduled.push(Scheduled {
            handle,
            due: self.now + delay,
            interval,
        });
        debug!(?handle, ?delay, repeating = interval.is_some(), "scheduled timer");
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue, by: Duration) -> Vec<TimerHandle> {
        let deadline = queue.now() + by;
        let mut fired = Vec::new();
        while let Some(handle) = queue.pop_due(deadline) {
            fired.push(handle);
        }
        queue.advance_to(deadline);
        fired
    }

    #[test]
    fn once_fires_a_single_time() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_once(Duration::from_millis(500));

        assert!(drain(&mut queue, Duration::from_millis(499)).is_empty());
        assert_eq!(drain(&mut queue, Duration::from_millis(1)), vec![handle]);
        assert!(!queue.is_pending(handle));
        assert!(drain(&mut queue, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn repeating_fires_every_interval() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(Duration::from_secs(1));

        let fired = drain(&mut queue, Duration::from_millis(3500));
        assert_eq!(fired, vec![handle, handle, handle]);
        assert!(queue.is_pending(handle));
        assert_eq!(queue.now(), Duration::from_millis(3500));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_once(Duration::from_millis(100));
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(drain(&mut queue, Duration::from_secs(1)).is_empty());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule_once(Duration::from_millis(300));
        let early = queue.schedule_once(Duration::from_millis(100));
        let tie = queue.schedule_once(Duration::from_millis(300));

        assert_eq!(drain(&mut queue, Duration::from_secs(1)), vec![early, late, tie]);
    }

    #[test]
    fn clock_follows_fired_timer() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(Duration::from_millis(250));
        queue.pop_due(Duration::from_secs(5));
        assert_eq!(queue.now(), Duration::from_millis(250));

        let next = queue.schedule_once(Duration::from_millis(250));
        assert_eq!(queue.pop_due(Duration::from_millis(500)), Some(next));
    }
}
