//! Time source port — where a timed trigger's time of day can come from.

use chrono::NaiveDate;
use starhook_domain::error::TimeSourceError;
use starhook_domain::time::{LocalTime, reference_date};

/// What a time source is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    /// The instant the question is asked at.
    pub now: LocalTime,
    /// The night `now` belongs to.
    pub reference_date: NaiveDate,
}

impl TimeContext {
    #[must_use]
    pub fn new(now: LocalTime) -> Self {
        Self {
            now,
            reference_date: reference_date(now),
        }
    }
}

/// A provider of absolute times, e.g. the current time or tonight's sunset.
///
/// Fixed sources depend on an external calculation and may fail; the
/// timed trigger catches those failures and reports them as validation
/// issues.
pub trait TimeSource: Send + Sync {
    /// Name shown in the provider chooser and stored in trigger settings.
    fn name(&self) -> &str;

    /// Whether the time comes from a calculation rather than manual entry.
    fn is_fixed(&self) -> bool {
        true
    }

    /// The absolute time this source stands for in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeSourceError`] when the time cannot be determined.
    fn date_time(&self, ctx: &TimeContext) -> Result<LocalTime, TimeSourceError>;
}
