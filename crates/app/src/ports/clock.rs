//! Clock port — where "now" comes from.

use std::sync::{Mutex, PoisonError};

use chrono::TimeDelta;
use starhook_domain::time::{self, LocalTime};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalTime;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalTime {
        time::now()
    }
}

/// A clock that only moves when told to.
///
/// Used to replay a night at a chosen instant, and in tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<LocalTime>,
}

impl ManualClock {
    #[must_use]
    pub fn new(at: LocalTime) -> Self {
        Self { now: Mutex::new(at) }
    }

    /// Jump to `at`.
    pub fn set(&self, at: LocalTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = at;
    }

    /// Move forward (or backward, for a negative delta) by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> LocalTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn at(s: &str) -> LocalTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn should_report_time_it_was_set_to() {
        let clock = ManualClock::new(at("2024-01-01T23:00:00"));
        assert_eq!(clock.now(), at("2024-01-01T23:00:00"));
        clock.set(at("2024-02-01T01:00:00"));
        assert_eq!(clock.now(), at("2024-02-01T01:00:00"));
    }

    #[test]
    fn should_advance_by_delta() {
        let clock = ManualClock::new(at("2024-01-01T23:59:59"));
        clock.advance(TimeDelta::seconds(2));
        assert_eq!(clock.now(), at("2024-01-02T00:00:01"));
    }

    #[test]
    fn should_read_system_clock() {
        let before = time::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
