//! Sequencer triggers — polled between sequence steps by the host engine.
//!
//! The host calls [`SequenceTrigger::should_trigger`] before moving on to the
//! next step and, when it answers `true`, awaits
//! [`SequenceTrigger::execute`]. Concrete triggers live in submodules;
//! [`Trigger`] wraps them so a sequence can hold a mixed list.

pub mod interval;
pub mod timed;

pub use interval::IntervalTrigger;
pub use timed::TimedTrigger;

use std::future::Future;
use std::sync::Arc;

use starhook_domain::error::StarhookError;
use starhook_domain::id::TriggerId;
use starhook_domain::trigger::{SequenceStep, TriggerMetadata};

use crate::cancellation::CancellationSignal;
use crate::ports::{Clock, Localizer, Notifier, ProgressSink};
use crate::time_sources::TimeSourceRegistry;

/// The sequence container a trigger is executing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub sequence_name: String,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            sequence_name: sequence_name.into(),
        }
    }
}

/// Host collaborators injected into every trigger.
///
/// Wraps `Arc`-ed ports so it is cheaply cloneable; built once by the
/// composition root.
#[derive(Clone)]
pub struct TriggerServices {
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub localizer: Arc<dyn Localizer>,
    pub time_sources: TimeSourceRegistry,
}

impl TriggerServices {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        localizer: Arc<dyn Localizer>,
        time_sources: TimeSourceRegistry,
    ) -> Self {
        Self {
            clock,
            notifier,
            localizer,
            time_sources,
        }
    }
}

/// The contract between a trigger and the sequence engine.
pub trait SequenceTrigger {
    fn id(&self) -> TriggerId;

    fn metadata(&self) -> &TriggerMetadata;

    /// Decide whether to fire between `previous` and `next`.
    fn should_trigger(
        &mut self,
        previous: Option<&SequenceStep>,
        next: Option<&SequenceStep>,
    ) -> bool;

    /// Run the trigger's action.
    ///
    /// Completes immediately. If `cancellation` is already raised nothing is
    /// done and [`StarhookError::Cancelled`] is returned.
    fn execute(
        &self,
        context: &ExecutionContext,
        progress: &dyn ProgressSink,
        cancellation: &CancellationSignal,
    ) -> impl Future<Output = Result<(), StarhookError>> + Send;

    /// Re-check configuration; returns whether the trigger is usable.
    fn validate(&mut self) -> bool;

    /// User-facing problems found by the last [`validate`](Self::validate).
    fn issues(&self) -> &[String];

    /// A fresh copy carrying only display metadata and shared collaborators.
    #[must_use]
    fn clone_trigger(&self) -> Self
    where
        Self: Sized;
}

/// Any of the concrete triggers.
pub enum Trigger {
    Timed(TimedTrigger),
    Interval(IntervalTrigger),
}

impl From<TimedTrigger> for Trigger {
    fn from(trigger: TimedTrigger) -> Self {
        Self::Timed(trigger)
    }
}

impl From<IntervalTrigger> for Trigger {
    fn from(trigger: IntervalTrigger) -> Self {
        Self::Interval(trigger)
    }
}

impl SequenceTrigger for Trigger {
    fn id(&self) -> TriggerId {
        match self {
            Self::Timed(t) => t.id(),
            Self::Interval(t) => t.id(),
        }
    }

    fn metadata(&self) -> &TriggerMetadata {
        match self {
            Self::Timed(t) => t.metadata(),
            Self::Interval(t) => t.metadata(),
        }
    }

    fn should_trigger(
        &mut self,
        previous: Option<&SequenceStep>,
        next: Option<&SequenceStep>,
    ) -> bool {
        match self {
            Self::Timed(t) => t.should_trigger(previous, next),
            Self::Interval(t) => t.should_trigger(previous, next),
        }
    }

    fn execute(
        &self,
        context: &ExecutionContext,
        progress: &dyn ProgressSink,
        cancellation: &CancellationSignal,
    ) -> impl Future<Output = Result<(), StarhookError>> + Send {
        let result = match self {
            Self::Timed(t) => t.fire(context, progress, cancellation),
            Self::Interval(t) => t.fire(context, progress, cancellation),
        };
        async move { result }
    }

    fn validate(&mut self) -> bool {
        match self {
            Self::Timed(t) => t.validate(),
            Self::Interval(t) => t.validate(),
        }
    }

    fn issues(&self) -> &[String] {
        match self {
            Self::Timed(t) => t.issues(),
            Self::Interval(t) => t.issues(),
        }
    }

    fn clone_trigger(&self) -> Self {
        match self {
            Self::Timed(t) => Self::Timed(t.clone_trigger()),
            Self::Interval(t) => Self::Interval(t.clone_trigger()),
        }
    }
}

/// Shared action of every trigger: a success toast.
fn announce(
    id: TriggerId,
    metadata: &TriggerMetadata,
    notifier: &dyn Notifier,
    context: &ExecutionContext,
    progress: &dyn ProgressSink,
    cancellation: &CancellationSignal,
) -> Result<(), StarhookError> {
    if cancellation.is_cancelled() {
        tracing::debug!(trigger = %id, "execution cancelled before it started");
        return Err(StarhookError::Cancelled);
    }
    progress.report(&format!("{} fired", metadata.name));
    notifier.show_success(&format!("{} fired in {}", metadata.name, context.sequence_name));
    tracing::info!(
        trigger = %id,
        name = %metadata.name,
        sequence = %context.sequence_name,
        "trigger executed"
    );
    Ok(())
}
