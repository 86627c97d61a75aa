//! Random interval trigger — a coin flip on every poll.

use std::future::Future;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starhook_domain::error::StarhookError;
use starhook_domain::id::TriggerId;
use starhook_domain::trigger::{DRAW_RANGE, SequenceStep, TriggerMetadata, fires_on};

use super::{ExecutionContext, SequenceTrigger, TriggerServices, announce};
use crate::cancellation::CancellationSignal;
use crate::ports::{Notifier, ProgressSink};

/// Fires on roughly half of all polls, independently each time.
pub struct IntervalTrigger {
    id: TriggerId,
    metadata: TriggerMetadata,
    rng: StdRng,
    notifier: Arc<dyn Notifier>,
}

impl IntervalTrigger {
    /// A trigger seeded from OS entropy.
    #[must_use]
    pub fn new(services: &TriggerServices) -> Self {
        Self::with_rng(services, StdRng::from_entropy())
    }

    /// A trigger with a reproducible sequence of draws.
    #[must_use]
    pub fn with_seed(services: &TriggerServices, seed: u64) -> Self {
        Self::with_rng(services, StdRng::seed_from_u64(seed))
    }

    fn with_rng(services: &TriggerServices, rng: StdRng) -> Self {
        Self {
            id: TriggerId::new(),
            metadata: TriggerMetadata::new("Random interval trigger", "Starhook")
                .with_description("Fires on a coin flip each time it is checked")
                .with_icon("dice"),
            rng,
            notifier: Arc::clone(&services.notifier),
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

impl SequenceTrigger for IntervalTrigger {
    fn id(&self) -> TriggerId {
        self.id
    }

    fn metadata(&self) -> &TriggerMetadata {
        &self.metadata
    }

    fn should_trigger(
        &mut self,
        _previous: Option<&SequenceStep>,
        _next: Option<&SequenceStep>,
    ) -> bool {
        let draw = self.rng.gen_range(0..DRAW_RANGE);
        let fires = fires_on(draw);
        tracing::trace!(trigger = %self.id, draw, fires, "interval trigger draw");
        fires
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
        true
    }

    fn issues(&self) -> &[String] {
        &[]
    }

    /// The copy gets its own entropy seed, even if this one was seeded.
    fn clone_trigger(&self) -> Self {
        Self {
            id: TriggerId::new(),
            metadata: self.metadata.clone(),
            rng: StdRng::from_entropy(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}
