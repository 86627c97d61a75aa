//! Wall-clock helpers.
//!
//! The imaging host schedules everything in local wall-clock time, so the
//! domain works with naive local date-times rather than UTC instants.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Local wall-clock instant used for trigger times and clock readings.
pub type LocalTime = NaiveDateTime;

/// Return the current local wall-clock time.
#[must_use]
pub fn now() -> LocalTime {
    Local::now().naive_local()
}

/// The date on which the night containing `at` began.
///
/// Nights are counted noon to noon: before local noon the reference date is
/// the previous calendar day.
#[must_use]
pub fn reference_date(at: LocalTime) -> NaiveDate {
    let date = at.date();
    if at.hour() < 12 {
        date.checked_sub_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    }
}

/// A time of day with whole-second precision. Defaults to midnight.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "NaiveTime")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time of day from its components.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] naming the first component
    /// outside `0..=23` / `0..=59` / `0..=59`.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ValidationError> {
        check_range("hours", hours, 23)?;
        check_range("minutes", minutes, 59)?;
        check_range("seconds", seconds, 59)?;
        NaiveTime::from_hms_opt(hours, minutes, seconds)
            .map(Self)
            .ok_or(ValidationError::OutOfRange {
                field: "seconds",
                value: seconds,
                max: 59,
            })
    }

    /// Take the time of day of `at`, dropping sub-second precision.
    #[must_use]
    pub fn of(at: LocalTime) -> Self {
        Self::from_time(at.time())
    }

    /// Truncate a [`NaiveTime`] to whole seconds.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    #[must_use]
    pub fn hours(self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0.minute()
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0.second()
    }

    /// The instant at this time of day on `date`.
    #[must_use]
    pub fn on(self, date: NaiveDate) -> LocalTime {
        date.and_time(self.0)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self::from_time(time)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::OutOfRange { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> LocalTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn should_return_current_local_time() {
        let before = Local::now().naive_local();
        let ts = now();
        let after = Local::now().naive_local();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_use_previous_day_as_reference_before_noon() {
        let date = reference_date(at("2024-03-10T03:00:00"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn should_use_same_day_as_reference_from_noon() {
        let date = reference_date(at("2024-03-10T12:00:00"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn should_keep_reference_date_across_midnight() {
        assert_eq!(
            reference_date(at("2024-03-10T23:59:59")),
            reference_date(at("2024-03-11T00:00:01"))
        );
    }

    #[test]
    fn should_build_time_of_day_from_components() {
        let tod = TimeOfDay::new(21, 5, 9).unwrap();
        assert_eq!(tod.hours(), 21);
        assert_eq!(tod.minutes(), 5);
        assert_eq!(tod.seconds(), 9);
        assert_eq!(tod.to_string(), "21:05:09");
    }

    #[test]
    fn should_reject_hours_out_of_range() {
        assert_eq!(
            TimeOfDay::new(24, 0, 0),
            Err(ValidationError::OutOfRange {
                field: "hours",
                value: 24,
                max: 23
            })
        );
    }

    #[test]
    fn should_reject_minutes_out_of_range() {
        assert!(matches!(
            TimeOfDay::new(1, 60, 0),
            Err(ValidationError::OutOfRange {
                field: "minutes",
                ..
            })
        ));
    }

    #[test]
    fn should_truncate_sub_second_precision() {
        let instant = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(20, 15, 30, 999)
            .unwrap();
        let tod = TimeOfDay::of(instant);
        assert_eq!(tod, TimeOfDay::new(20, 15, 30).unwrap());
    }

    #[test]
    fn should_drop_fraction_when_deserializing() {
        let tod: TimeOfDay = serde_json::from_str("\"17:30:00.750\"").unwrap();
        assert_eq!(tod, TimeOfDay::new(17, 30, 0).unwrap());
        assert_eq!(serde_json::to_string(&tod).unwrap(), "\"17:30:00\"");
    }

    #[test]
    fn should_place_time_of_day_on_date() {
        let tod = TimeOfDay::new(6, 30, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(tod.on(date), at("2024-01-02T06:30:00"));
    }
}
