//! Triggers — polled condition/action pairs evaluated between sequence steps.
//!
//! The sequence engine asks every trigger whether it should fire before
//! moving from one step to the next. This module holds the pure parts:
//! display metadata, the persisted settings of the timed trigger, and the
//! planning rules that compute its next fire time.

mod interval;
mod timed;

pub use interval::{DRAW_RANGE, fires_on};
pub use timed::{
    Schedule, TimedTriggerSettings, TriggerStatus, apply_offset, next_trigger_time, plan,
};

use serde::{Deserialize, Serialize};

use crate::error::{StarhookError, ValidationError};

/// Display metadata shown by the sequence editor.
///
/// This is the only part of a trigger that survives cloning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMetadata {
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: Option<String>,
}

impl TriggerMetadata {
    /// Metadata with the given name and category and no description or icon.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: category.into(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StarhookError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), StarhookError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// A step of the running sequence, as seen by a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub name: String,
}

impl SequenceStep {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
