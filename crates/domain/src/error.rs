//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StarhookError`] via `#[from]` at port boundaries.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum StarhookError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("time source error")]
    TimeSource(#[from] TimeSourceError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The host raised the cancellation signal before the work ran.
    #[error("operation cancelled")]
    Cancelled,
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} = {value} is outside 0..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// A fixed time source could not produce a time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeSourceError {
    #[error("time source {source_name} is unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("time source {source_name} has no event on {date}")]
    NoEvent {
        source_name: String,
        date: chrono::NaiveDate,
    },
}

/// A lookup by name or id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
