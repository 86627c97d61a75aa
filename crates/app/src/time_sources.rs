//! Time-source registry shared by all timed triggers.

use std::fmt;
use std::sync::Arc;

use starhook_domain::error::TimeSourceError;
use starhook_domain::time::LocalTime;

use crate::ports::{TimeContext, TimeSource};

/// Name of the built-in manual-entry source.
pub const NOW_PROVIDER_NAME: &str = "Time";

/// The default source: plain manual H:M:S entry.
///
/// It is not fixed, so selecting it is the same as selecting nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NowProvider;

impl TimeSource for NowProvider {
    fn name(&self) -> &str {
        NOW_PROVIDER_NAME
    }

    fn is_fixed(&self) -> bool {
        false
    }

    fn date_time(&self, ctx: &TimeContext) -> Result<LocalTime, TimeSourceError> {
        Ok(ctx.now)
    }
}

/// The list of available time sources.
///
/// Cheap to clone; clones share the same underlying list, so a cloned
/// trigger offers exactly the sources of its original.
#[derive(Clone)]
pub struct TimeSourceRegistry {
    sources: Arc<[Arc<dyn TimeSource>]>,
}

impl TimeSourceRegistry {
    /// Build a registry holding [`NowProvider`] followed by `fixed`.
    #[must_use]
    pub fn new(fixed: Vec<Arc<dyn TimeSource>>) -> Self {
        let mut sources: Vec<Arc<dyn TimeSource>> = Vec::with_capacity(fixed.len() + 1);
        sources.push(Arc::new(NowProvider));
        sources.extend(fixed);
        Self {
            sources: Arc::from(sources),
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn TimeSource>] {
        &self.sources
    }

    /// Find a source by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<dyn TimeSource>> {
        self.sources.iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Whether both registries are views of the same list.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sources, &other.sources)
    }
}

impl Default for TimeSourceRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for TimeSourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
