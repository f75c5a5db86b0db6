// src/query/debounce.rs
use std::time::{Duration, Instant};

/// Holds back a fast-changing value until it has been stable for `delay`.
///
/// No timer thread: the owner passes `now` in, so the frontend's own clock
/// (an event loop tick, a test's fake instants) drives it. Every new value
/// restarts the wait; pushing the value already waiting does not.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T: PartialEq> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T, now: Instant) {
        if matches!(&self.pending, Some((v, _)) if *v == value) {
            return;
        }
        self.pending = Some((value, now));
    }

    /// The settled value, once. `None` while still waiting or with nothing pending.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((_, since)) if now.saturating_duration_since(*since) >= self.delay);
        if ready { self.pending.take().map(|(v, _)| v) } else { None }
    }

    /// When the pending value will settle, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_does_not_restart_wait() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(300));
        d.push("ab", t0);
        d.push("ab", t0 + Duration::from_millis(200));
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(300)));
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), Some("ab"));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push(1, t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
    }
}
