//! Timed trigger — fires once a day at a set time of day.
//!
//! The time of day is either entered manually (H:M:S) or taken from a fixed
//! time source such as tonight's sunset, shifted by a minute offset. Every
//! configuration change recomputes the next fire time; a fixed source is
//! re-asked when the night turns over.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use starhook_domain::error::{NotFoundError, StarhookError};
use starhook_domain::id::TriggerId;
use starhook_domain::time::{LocalTime, reference_date};
use starhook_domain::trigger::{
    Schedule, SequenceStep, TimedTriggerSettings, TriggerMetadata, TriggerStatus, plan,
};

use super::{ExecutionContext, SequenceTrigger, TriggerServices, announce};
use crate::cancellation::CancellationSignal;
use crate::ports::{Clock, Localizer, Notifier, ProgressSink, TimeContext, TimeSource};
use crate::time_sources::TimeSourceRegistry;

/// Localization key of the single validation issue a timed trigger reports.
pub const TIME_NOT_DETERMINED: &str = "timed_trigger.validation.time_not_determined";

/// Fires when the wall clock passes the configured time of day.
pub struct TimedTrigger {
    id: TriggerId,
    metadata: TriggerMetadata,
    settings: TimedTriggerSettings,
    time_sources: TimeSourceRegistry,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    localizer: Arc<dyn Localizer>,
    schedule: Option<Schedule>,
    reference_date: Option<NaiveDate>,
    status: TriggerStatus,
    issues: Vec<String>,
}

impl TimedTrigger {
    /// A manual-entry trigger at midnight, not yet validated.
    #[must_use]
    pub fn new(services: &TriggerServices) -> Self {
        Self::with_metadata(services, default_metadata())
    }

    /// A trigger restored from persisted settings, not yet validated.
    #[must_use]
    pub fn with_settings(services: &TriggerServices, settings: TimedTriggerSettings) -> Self {
        let mut trigger = Self::new(services);
        trigger.settings = settings;
        trigger
    }

    fn with_metadata(services: &TriggerServices, metadata: TriggerMetadata) -> Self {
        Self {
            id: TriggerId::new(),
            metadata,
            settings: TimedTriggerSettings::default(),
            time_sources: services.time_sources.clone(),
            clock: Arc::clone(&services.clock),
            notifier: Arc::clone(&services.notifier),
            localizer: Arc::clone(&services.localizer),
            schedule: None,
            reference_date: None,
            status: TriggerStatus::Unvalidated,
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &TimedTriggerSettings {
        &self.settings
    }

    #[must_use]
    pub fn time_sources(&self) -> &TimeSourceRegistry {
        &self.time_sources
    }

    /// Next fire instant, if the last recompute succeeded.
    #[must_use]
    pub fn trigger_time(&self) -> Option<LocalTime> {
        self.schedule.map(|s| s.trigger_time)
    }

    #[must_use]
    pub fn status(&self) -> TriggerStatus {
        self.status
    }

    #[must_use]
    pub fn time_determined_successfully(&self) -> bool {
        self.status == TriggerStatus::Valid
    }

    /// Night the last recompute was computed against.
    #[must_use]
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    pub fn set_hours(&mut self, hours: u32) {
        self.settings.hours = hours;
        self.recompute();
    }

    pub fn set_minutes(&mut self, minutes: u32) {
        self.settings.minutes = minutes;
        self.recompute();
    }

    pub fn set_seconds(&mut self, seconds: u32) {
        self.settings.seconds = seconds;
        self.recompute();
    }

    pub fn set_minutes_offset(&mut self, minutes_offset: i32) {
        self.settings.minutes_offset = minutes_offset;
        self.recompute();
    }

    /// Select a time source by name; `None` returns to manual entry.
    ///
    /// # Errors
    ///
    /// Returns [`StarhookError::NotFound`] if no source has that name. The
    /// current selection is kept in that case.
    pub fn set_selected_provider(&mut self, name: Option<&str>) -> Result<(), StarhookError> {
        if let Some(name) = name {
            if self.time_sources.find(name).is_none() {
                return Err(NotFoundError {
                    entity: "TimeSource",
                    id: name.to_string(),
                }
                .into());
            }
        }
        self.settings.selected_provider = name.map(str::to_string);
        self.recompute();
        Ok(())
    }

    /// Replace all persisted settings at once.
    pub fn set_settings(&mut self, settings: TimedTriggerSettings) {
        self.settings = settings;
        self.recompute();
    }

    /// Recompute the next fire time from the current settings and clock.
    ///
    /// With a fixed source selected, the derived H:M:S are written back into
    /// the settings. Failures are not returned: they leave the trigger
    /// invalid with one validation issue.
    #[tracing::instrument(skip(self), fields(trigger = %self.id))]
    pub fn recompute(&mut self) {
        let now = self.clock.now();
        match self.try_plan(now) {
            Ok((schedule, from_fixed_source)) => {
                if from_fixed_source {
                    self.settings.set_time_of_day(schedule.time_of_day);
                }
                tracing::debug!(trigger_time = %schedule.trigger_time, "trigger time determined");
                self.reference_date = Some(schedule.reference_date);
                self.schedule = Some(schedule);
                self.status = TriggerStatus::Valid;
            }
            Err(err) => {
                tracing::warn!(error = ?err, "unable to determine trigger time");
                self.reference_date = Some(reference_date(now));
                self.schedule = None;
                self.status = TriggerStatus::Invalid;
            }
        }
        self.refresh_issues();
    }

    fn try_plan(&self, now: LocalTime) -> Result<(Schedule, bool), StarhookError> {
        let fixed_time = match self.fixed_source()? {
            Some(source) => Some(source.date_time(&TimeContext::new(now))?),
            None => None,
        };
        let schedule = plan(&self.settings, fixed_time, now)?;
        Ok((schedule, fixed_time.is_some()))
    }

    /// The selected source, if it is a fixed one.
    fn fixed_source(&self) -> Result<Option<&Arc<dyn TimeSource>>, NotFoundError> {
        let Some(name) = self.settings.selected_provider.as_deref() else {
            return Ok(None);
        };
        let source = self.time_sources.find(name).ok_or_else(|| NotFoundError {
            entity: "TimeSource",
            id: name.to_string(),
        })?;
        Ok(source.is_fixed().then_some(source))
    }

    fn uses_fixed_source(&self) -> bool {
        matches!(self.fixed_source(), Ok(Some(_)))
    }

    fn refresh_issues(&mut self) {
        self.issues.clear();
        if self.status == TriggerStatus::Invalid {
            self.issues.push(self.localizer.lookup(TIME_NOT_DETERMINED));
        }
    }

    pub(crate) fn fire(
        &self,
        context: &ExecutionContext,
        progress: &dyn ProgressSink,
        cancellation: &CancellationSignal,
    ) -> Result<(), StarhookError> {
        announce(
            self.id,
            &self.metadata,
            self.notifier.as_ref(),
            context,
            progress,
            cancellation,
        )
    }
}

impl SequenceTrigger for TimedTrigger {
    fn id(&self) -> TriggerId {
        self.id
    }

    fn metadata(&self) -> &TriggerMetadata {
        &self.metadata
    }

    /// Fires at most once per recompute: a poll arriving days late fires
    /// once and schedules the next occurrence after "now".
    fn should_trigger(
        &mut self,
        _previous: Option<&SequenceStep>,
        _next: Option<&SequenceStep>,
    ) -> bool {
        if self.status == TriggerStatus::Unvalidated {
            self.recompute();
        }
        let Some(schedule) = self.schedule else {
            return false;
        };
        let now = self.clock.now();
        if !schedule.is_due(now) {
            return false;
        }
        tracing::info!(
            trigger = %self.id,
            trigger_time = %schedule.trigger_time,
            %now,
            "timed trigger due"
        );
        self.recompute();
        true
    }

    fn execute(
        &self,
        context: &ExecutionContext,
        progress: &dyn ProgressSink,
        cancellation: &CancellationSignal,
    ) -> impl Future<Output = Result<(), StarhookError>> + Send {
        let result = self.fire(context, progress, cancellation);
        async move { result }
    }

    fn validate(&mut self) -> bool {
        let stale = match self.status {
            TriggerStatus::Unvalidated => true,
            TriggerStatus::Valid | TriggerStatus::Invalid => {
                self.uses_fixed_source()
                    && self.reference_date != Some(reference_date(self.clock.now()))
            }
        };
        if stale {
            self.recompute();
        } else {
            self.refresh_issues();
        }
        self.time_determined_successfully()
    }

    fn issues(&self) -> &[String] {
        &self.issues
    }

    fn clone_trigger(&self) -> Self {
        Self {
            id: TriggerId::new(),
            metadata: self.metadata.clone(),
            settings: TimedTriggerSettings::default(),
            time_sources: self.time_sources.clone(),
            clock: Arc::clone(&self.clock),
            notifier: Arc::clone(&self.notifier),
            localizer: Arc::clone(&self.localizer),
            schedule: None,
            reference_date: None,
            status: TriggerStatus::Unvalidated,
            issues: Vec::new(),
        }
    }
}

fn default_metadata() -> TriggerMetadata {
    TriggerMetadata::new("Timed trigger", "Starhook")
        .with_description("Fires once a day at a set time, or at a time derived from a time source")
        .with_icon("clock")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeDelta;
    use starhook_domain::error::TimeSourceError;

    use super::*;
    use crate::ports::NullProgress;
    use crate::triggers::test_support::{StubSource, at, fixture};

    fn midnight_trigger(now: &str) -> (crate::triggers::test_support::Fixture, TimedTrigger) {
        let fx = fixture(now, vec![]);
        let trigger = TimedTrigger::with_settings(&fx.services, TimedTriggerSettings::at(0, 0, 0));
        (fx, trigger)
    }

    #[test]
    fn should_start_unvalidated_without_trigger_time() {
        let (_fx, trigger) = midnight_trigger("2024-01-01T23:00:00");
        assert_eq!(trigger.status(), TriggerStatus::Unvalidated);
        assert!(trigger.trigger_time().is_none());
        assert!(!trigger.time_determined_successfully());
    }

    #[test]
    fn should_fire_once_when_midnight_passes() {
        let (fx, mut trigger) = midnight_trigger("2024-01-01T23:00:00");
        trigger.recompute();
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-02T00:00:00")));

        fx.clock.set(at("2024-01-01T23:59:59"));
        assert!(!trigger.should_trigger(None, None));

        fx.clock.set(at("2024-01-02T00:00:01"));
        assert!(trigger.should_trigger(None, None));
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-03T00:00:00")));

        assert!(!trigger.should_trigger(None, None));
    }

    #[test]
    fn should_not_fire_exactly_at_trigger_time() {
        let (fx, mut trigger) = midnight_trigger("2024-01-01T23:00:00");
        trigger.recompute();
        fx.clock.set(at("2024-01-02T00:00:00"));
        assert!(!trigger.should_trigger(None, None));
    }

    #[test]
    fn should_fire_only_once_for_a_poll_several_days_late() {
        let (fx, mut trigger) = midnight_trigger("2024-01-01T23:00:00");
        trigger.recompute();

        fx.clock.set(at("2024-01-05T08:00:00"));
        assert!(trigger.should_trigger(None, None));
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-06T00:00:00")));
        assert!(!trigger.should_trigger(None, None));
    }

    #[test]
    fn should_compute_schedule_lazily_on_first_poll() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T23:00:00");
        assert!(!trigger.should_trigger(None, None));
        assert_eq!(trigger.status(), TriggerStatus::Valid);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-02T00:00:00")));
    }

    #[test]
    fn should_recompute_on_every_setter() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        trigger.set_hours(20);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T20:00:00")));
        trigger.set_minutes(15);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T20:15:00")));
        trigger.set_seconds(30);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T20:15:30")));
        trigger.set_hours(9);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-02T09:15:30")));
    }

    #[test]
    fn should_ignore_offset_for_manual_entry() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        trigger.set_hours(20);
        trigger.set_minutes_offset(-30);
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T20:00:00")));
    }

    #[test]
    fn should_become_invalid_for_out_of_range_hours() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        trigger.set_hours(24);
        assert_eq!(trigger.status(), TriggerStatus::Invalid);
        assert!(trigger.trigger_time().is_none());
        assert_eq!(trigger.issues().len(), 1);
        assert!(!trigger.should_trigger(None, None));
    }

    #[test]
    fn should_derive_components_from_fixed_source_and_offset() {
        let fx = fixture(
            "2024-01-01T13:00:00",
            vec![Arc::new(StubSource::at("Sunset", 16, 45, 12))],
        );
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_minutes_offset(30);
        trigger.set_selected_provider(Some("Sunset")).unwrap();

        let settings = trigger.settings();
        assert_eq!(
            (settings.hours, settings.minutes, settings.seconds),
            (17, 15, 12)
        );
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T17:15:12")));
        assert!(trigger.time_determined_successfully());
    }

    #[test]
    fn should_treat_now_provider_as_manual_entry() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        trigger.set_hours(21);
        trigger
            .set_selected_provider(Some(crate::time_sources::NOW_PROVIDER_NAME))
            .unwrap();
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-01T21:00:00")));
    }

    #[test]
    fn should_reject_unknown_provider_and_keep_selection() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        let result = trigger.set_selected_provider(Some("Moonrise"));
        assert!(matches!(result, Err(StarhookError::NotFound(_))));
        assert!(trigger.settings().selected_provider.is_none());
    }

    #[test]
    fn should_report_single_issue_when_source_fails() {
        let fx = fixture(
            "2024-01-01T13:00:00",
            vec![Arc::new(StubSource::failing("Sunrise"))],
        );
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_selected_provider(Some("Sunrise")).unwrap();

        assert_eq!(trigger.status(), TriggerStatus::Invalid);
        assert!(!trigger.validate());
        assert_eq!(
            trigger.issues(),
            [
                "Unable to determine the trigger time from the selected time source".to_string()
            ]
        );
        assert!(!trigger.validate());
        assert_eq!(trigger.issues().len(), 1);
    }

    #[test]
    fn should_return_same_issues_when_validated_twice() {
        let (_fx, mut trigger) = midnight_trigger("2024-01-01T12:00:00");
        assert!(trigger.validate());
        let first = trigger.issues().to_vec();
        assert!(trigger.validate());
        assert_eq!(trigger.issues(), first.as_slice());
        assert!(first.is_empty());
    }

    #[test]
    fn should_invalidate_unknown_persisted_provider() {
        let fx = fixture("2024-01-01T12:00:00", vec![]);
        let settings = TimedTriggerSettings {
            selected_provider: Some("Moonrise".to_string()),
            ..TimedTriggerSettings::default()
        };
        let mut trigger = TimedTrigger::with_settings(&fx.services, settings);
        assert!(!trigger.validate());
        assert_eq!(trigger.issues().len(), 1);
    }

    #[test]
    fn should_recover_when_source_succeeds_after_night_turns_over() {
        let source = Arc::new(StubSource::failing("Sunset"));
        let fx = fixture("2024-01-01T13:00:00", vec![source.clone() as Arc<dyn TimeSource>]);
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_selected_provider(Some("Sunset")).unwrap();
        assert!(!trigger.validate());

        *source.time.lock().unwrap() = Ok((17, 0, 0));
        fx.clock.advance(TimeDelta::hours(1));
        assert!(!trigger.validate(), "same night: no recompute");

        fx.clock.set(at("2024-01-02T13:00:00"));
        assert!(trigger.validate());
        assert!(trigger.issues().is_empty());
        assert_eq!(trigger.trigger_time(), Some(at("2024-01-02T17:00:00")));
    }

    #[test]
    fn should_refresh_fixed_time_when_night_turns_over() {
        let source = Arc::new(StubSource::at("Sunset", 17, 0, 0));
        let fx = fixture("2024-01-01T13:00:00", vec![source.clone() as Arc<dyn TimeSource>]);
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_selected_provider(Some("Sunset")).unwrap();
        assert_eq!(
            trigger.reference_date(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );

        *source.time.lock().unwrap() = Ok((17, 2, 0));
        fx.clock.set(at("2024-01-02T12:30:00"));
        assert!(trigger.validate());
        assert_eq!(trigger.settings().minutes, 2);
        assert_eq!(
            trigger.reference_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn should_go_invalid_when_source_starts_failing() {
        let source = Arc::new(StubSource::at("Sunset", 17, 0, 0));
        let fx = fixture("2024-01-01T13:00:00", vec![source.clone() as Arc<dyn TimeSource>]);
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_selected_provider(Some("Sunset")).unwrap();
        assert!(trigger.validate());

        *source.time.lock().unwrap() = Err(TimeSourceError::NoEvent {
            source_name: "Sunset".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        });
        fx.clock.set(at("2024-01-02T13:00:00"));
        assert!(!trigger.validate());
        assert!(trigger.trigger_time().is_none());
    }

    #[test]
    fn should_clone_metadata_and_sources_only() {
        let fx = fixture(
            "2024-01-01T13:00:00",
            vec![Arc::new(StubSource::at("Sunset", 17, 0, 0))],
        );
        let mut trigger = TimedTrigger::new(&fx.services);
        trigger.set_hours(22);
        trigger.set_minutes_offset(-10);

        let copy = trigger.clone_trigger();
        assert_ne!(copy.id(), trigger.id());
        assert_eq!(copy.metadata(), trigger.metadata());
        assert!(copy.time_sources().shares_with(trigger.time_sources()));
        assert_eq!(copy.settings(), &TimedTriggerSettings::default());
        assert_eq!(copy.status(), TriggerStatus::Unvalidated);
        assert!(copy.trigger_time().is_none());
    }

    #[tokio::test]
    async fn should_notify_on_execute() {
        let (fx, trigger) = midnight_trigger("2024-01-01T23:00:00");
        trigger
            .execute(
                &ExecutionContext::new("M31"),
                &NullProgress,
                &CancellationSignal::never(),
            )
            .await
            .unwrap();
        assert_eq!(
            fx.notifier.messages.lock().unwrap().as_slice(),
            ["Timed trigger fired in M31".to_string()]
        );
    }
}
