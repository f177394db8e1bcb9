//! Error types for log loading and replay.

use thiserror::Error;

/// Main error type for replay operations.
///
/// Only structural problems surface here. Semantic anomalies inside a
/// well-formed event (a tile missing from a hand, an unmatched kakan, ...)
/// are absorbed by the accumulator and never become errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log contains no events")]
    EmptyLog,

    #[error("Malformed event on line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("Event index {index} out of range (log has {len} events)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Seat out of range: {0}")]
    SeatOutOfRange(u8),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Serialization(e.to_string())
    }
}

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;
