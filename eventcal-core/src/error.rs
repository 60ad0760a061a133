//! Error types for eventcal.

use thiserror::Error;

/// Errors that can occur in eventcal operations.
///
/// Rejected saves (empty title) and edits of unknown ids are not errors;
/// the store reports those through its return values.
#[derive(Error, Debug)]
pub enum EventCalError {
    #[error("Month out of range: {0} (expected 0-11)")]
    InvalidMonth(u32),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Event ends before it starts: {end} < {start}")]
    InvalidSlot { start: String, end: String },

    #[error("No event matches id '{0}'")]
    EventNotFound(String),

    #[error("Event id '{0}' is ambiguous")]
    AmbiguousEventId(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for eventcal operations.
pub type EventCalResult<T> = Result<T, EventCalError>;
