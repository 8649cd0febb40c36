//! Cancellable debounce timer driven by the caller's clock
//!
//! The event loop owns time: it passes `Instant`s in and asks how long it may
//! sleep, so nothing here spawns threads or sleeps.

use std::time::{Duration, Instant};

/// Delay before a changed subject is actually fetched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Holds at most one pending value; scheduling again replaces it
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` to fire `delay` after `now`, cancelling whatever was pending
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Drop the pending value, returning it if there was one
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Time left before the pending value fires, `None` when idle
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.schedule("octocat", start);

        assert_eq!(d.poll(start + 299 * MS), None);
        assert_eq!(d.poll(start + 300 * MS), Some("octocat"));
        assert_eq!(d.poll(start + 400 * MS), None, "fires once");
    }

    #[test]
    fn test_reschedule_replaces_and_restarts_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.schedule("a", start);
        d.schedule("ab", start + 200 * MS);

        // The first deadline has passed but was superseded
        assert_eq!(d.poll(start + 350 * MS), None);
        assert_eq!(d.poll(start + 500 * MS), Some("ab"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.schedule(1, start);
        assert!(d.time_until_due(start).is_some());

        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.time_until_due(start), None);
        assert_eq!(d.poll(start + Duration::from_secs(5)), None);
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn test_time_until_due() {
        let start = Instant::now();
        let mut d: Debouncer<()> = Debouncer::default();
        assert_eq!(d.time_until_due(start), None);

        d.schedule((), start);
        assert_eq!(d.time_until_due(start + 100 * MS), Some(200 * MS));
        assert_eq!(d.time_until_due(start + 900 * MS), Some(Duration::ZERO));
    }

    #[test]
    fn test_default_delay() {
        let d: Debouncer<u8> = Debouncer::default();
        assert_eq!(d.delay(), Duration::from_millis(300));
    }
}
