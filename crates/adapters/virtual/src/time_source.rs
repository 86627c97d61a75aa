//! Virtual fixed time source.

use starhook_app::ports::{TimeContext, TimeSource};
use starhook_domain::error::TimeSourceError;
use starhook_domain::time::{LocalTime, TimeOfDay};

/// Answers the same time of day on every night.
///
/// Times before noon fall on the morning after the reference date, so a
/// virtual "sunrise" at 06:30 means the end of the current night.
#[derive(Debug, Clone)]
pub struct VirtualTimeSource {
    name: String,
    time_of_day: TimeOfDay,
}

impl VirtualTimeSource {
    #[must_use]
    pub fn new(name: impl Into<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            name: name.into(),
            time_of_day,
        }
    }
}

impl TimeSource for VirtualTimeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn date_time(&self, ctx: &TimeContext) -> Result<LocalTime, TimeSourceError> {
        let date = if self.time_of_day.hours() < 12 {
            ctx.reference_date.succ_opt()
        } else {
            Some(ctx.reference_date)
        };
        let date = date.ok_or_else(|| TimeSourceError::NoEvent {
            source_name: self.name.clone(),
            date: ctx.reference_date,
        })?;
        tracing::trace!(source = %self.name, %date, time = %self.time_of_day, "virtual time");
        Ok(self.time_of_day.on(date))
    }
}
