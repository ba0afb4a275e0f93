//! Error types for the progression engine.

use thiserror::Error;

/// Result type for progression operations.
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Errors that can occur while handling progress data.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// A unit number outside 1..=6.
    #[error("invalid unit: {0} (expected 1-{max})", max = crate::unit::UNIT_COUNT)]
    InvalidUnit(u8),

    /// A level number outside the challenge track.
    #[error("invalid level: {0} (expected 1-{max})", max = crate::unlock::TRACK_LENGTH)]
    InvalidLevel(u32),

    /// Durable storage could not be read or written.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Progress could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
