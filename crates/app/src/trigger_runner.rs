//! Trigger runner — plays the host's polling contract over a list of triggers.
//!
//! Between two sequence steps the runner asks every trigger whether it
//! should fire and executes the ones that do, in list order.

use chrono::NaiveDate;
use starhook_domain::error::StarhookError;
use starhook_domain::id::TriggerId;
use starhook_domain::time::{LocalTime, reference_date};
use starhook_domain::trigger::SequenceStep;

use crate::cancellation::CancellationSignal;
use crate::ports::ProgressSink;
use crate::triggers::{ExecutionContext, SequenceTrigger, Trigger};

/// Polls a sequence's triggers between steps.
#[derive(Default)]
pub struct TriggerRunner {
    triggers: Vec<Trigger>,
    validated_night: Option<NaiveDate>,
}

impl TriggerRunner {
    #[must_use]
    pub fn new(triggers: Vec<Trigger>) -> Self {
        Self {
            triggers,
            validated_night: None,
        }
    }

    pub fn push(&mut self, trigger: impl Into<Trigger>) {
        self.triggers.push(trigger.into());
    }

    #[must_use]
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// Validate every trigger and return the ones with issues.
    pub fn validate_all(&mut self) -> Vec<(TriggerId, Vec<String>)> {
        let mut invalid = Vec::new();
        for trigger in &mut self.triggers {
            if trigger.validate() {
                continue;
            }
            tracing::warn!(
                trigger = %trigger.id(),
                name = %trigger.metadata().name,
                issues = ?trigger.issues(),
                "trigger is not valid"
            );
            invalid.push((trigger.id(), trigger.issues().to_vec()));
        }
        invalid
    }

    /// Validate every trigger once per night.
    ///
    /// Returns `None` when `now` falls in the night already validated,
    /// otherwise the triggers with issues as [`validate_all`](Self::validate_all)
    /// does.
    pub fn revalidate_for_night(
        &mut self,
        now: LocalTime,
    ) -> Option<Vec<(TriggerId, Vec<String>)>> {
        let night = reference_date(now);
        if self.validated_night == Some(night) {
            return None;
        }
        tracing::debug!(%night, "validating triggers for night");
        self.validated_night = Some(night);
        Some(self.validate_all())
    }

    /// Poll every trigger once and execute those that fire.
    ///
    /// Returns the ids of the triggers that fired and executed successfully.
    /// A failing execution is logged and does not stop the remaining
    /// triggers.
    ///
    /// # Errors
    ///
    /// Returns [`StarhookError::Cancelled`] as soon as `cancellation` is
    /// observed raised.
    #[tracing::instrument(skip_all, fields(sequence = %context.sequence_name))]
    pub async fn poll(
        &mut self,
        previous: Option<&SequenceStep>,
        next: Option<&SequenceStep>,
        context: &ExecutionContext,
        progress: &dyn ProgressSink,
        cancellation: &CancellationSignal,
    ) -> Result<Vec<TriggerId>, StarhookError> {
        let mut fired = Vec::new();

        for trigger in &mut self.triggers {
            if cancellation.is_cancelled() {
                return Err(StarhookError::Cancelled);
            }
            if !trigger.should_trigger(previous, next) {
                continue;
            }
            match trigger.execute(context, progress, cancellation).await {
                Ok(()) => fired.push(trigger.id()),
                Err(StarhookError::Cancelled) => return Err(StarhookError::Cancelled),
                Err(err) => {
                    tracing::warn!(
                        trigger = %trigger.id(),
                        error = ?err,
                        "trigger execution failed"
                    );
                }
            }
        }

        Ok(fired)
    }
}
