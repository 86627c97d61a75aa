//! Timed trigger — fires once a day at a configured or provider-derived time.

use chrono::{Days, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{LocalTime, TimeOfDay, reference_date};

/// Persisted configuration of a timed trigger.
///
/// These are exactly the fields that round-trip through the host's
/// serialization. Component ranges are checked when a schedule is planned,
/// not on assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimedTriggerSettings {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Minutes added to a fixed provider's time. Ignored for manual entry.
    pub minutes_offset: i32,
    /// Name of the selected time source; `None` means manual entry.
    pub selected_provider: Option<String>,
}

impl TimedTriggerSettings {
    /// Manual-entry settings firing at `hours:minutes:seconds`.
    #[must_use]
    pub fn at(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            ..Self::default()
        }
    }

    /// The configured time of day.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if a component is out of range.
    pub fn time_of_day(&self) -> Result<TimeOfDay, ValidationError> {
        TimeOfDay::new(self.hours, self.minutes, self.seconds)
    }

    /// Overwrite the H:M:S components with `tod`.
    pub fn set_time_of_day(&mut self, tod: TimeOfDay) {
        self.hours = tod.hours();
        self.minutes = tod.minutes();
        self.seconds = tod.seconds();
    }
}

/// Outcome of the last recompute of a timed trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerStatus {
    /// Never recomputed.
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// A planned fire time together with what it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Effective time of day, after any provider offset.
    pub time_of_day: TimeOfDay,
    /// Next instant at `time_of_day` strictly after the planning "now".
    pub trigger_time: LocalTime,
    /// Night the plan was computed against.
    pub reference_date: NaiveDate,
}

impl Schedule {
    /// Whether `now` is past the planned fire time.
    #[must_use]
    pub fn is_due(&self, now: LocalTime) -> bool {
        now > self.trigger_time
    }
}

/// Shift a provider's time by `minutes_offset` and keep its time of day.
#[must_use]
pub fn apply_offset(time: LocalTime, minutes_offset: i32) -> TimeOfDay {
    TimeOfDay::of(time + TimeDelta::minutes(i64::from(minutes_offset)))
}

/// The next instant at `tod` strictly after `now`.
///
/// Today's occurrence is used when it is still ahead, otherwise the
/// occurrence one calendar day later.
#[must_use]
pub fn next_trigger_time(tod: TimeOfDay, now: LocalTime) -> LocalTime {
    let today = tod.on(now.date());
    if today > now {
        return today;
    }
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Plan the next fire time for `settings`.
///
/// `fixed_time` is the value reported by the selected fixed time source, if
/// any; it replaces the manual H:M:S after `minutes_offset` is applied.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] when no fixed time is given and
/// the manual H:M:S is out of range.
pub fn plan(
    settings: &TimedTriggerSettings,
    fixed_time: Option<LocalTime>,
    now: LocalTime,
) -> Result<Schedule, ValidationError> {
    let time_of_day = match fixed_time {
        Some(time) => apply_offset(time, settings.minutes_offset),
        None => settings.time_of_day()?,
    };
    Ok(Schedule {
        time_of_day,
        trigger_time: next_trigger_time(time_of_day, now),
        reference_date: reference_date(now),
    })
}
