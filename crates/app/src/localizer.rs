//! In-memory [`Localizer`] backed by a static string table.

use std::collections::HashMap;

use crate::ports::Localizer;
use crate::triggers::timed::TIME_NOT_DETERMINED;

/// String table lookup that falls back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    entries: HashMap<String, String>,
}

impl StaticLocalizer {
    /// The English table for every key the plugins use.
    #[must_use]
    pub fn english() -> Self {
        Self::default().with_entry(
            TIME_NOT_DETERMINED,
            "Unable to determine the trigger time from the selected time source",
        )
    }

    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl Localizer for StaticLocalizer {
    fn lookup(&self, key: &str) -> String {
        if let Some(value) = self.entries.get(key) {
            return value.clone();
        }
        tracing::debug!(key, "no localized string");
        key.to_string()
    }
}
