//! Trigger identity.

use std::fmt;

/// Identity of a single trigger instance inside a sequence.
///
/// Cloning a trigger in the sequence editor produces a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(uuid::Uuid);

impl Default for TriggerId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl TriggerId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
