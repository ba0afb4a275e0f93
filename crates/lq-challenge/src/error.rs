//! Error types for challenge sessions.

use thiserror::Error;

/// Result type for challenge operations.
pub type ChallengeResult<T> = Result<T, ChallengeError>;

/// Errors raised while setting up a session.
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// A prompt has no choices.
    #[error("prompt has no choices: {0}")]
    EmptyChoices(String),

    /// A prompt's correct index does not point at one of its choices.
    #[error("correct index {index} out of range for {len} choices")]
    InvalidCorrectIndex {
        /// The offending index.
        index: usize,
        /// Number of choices.
        len: usize,
    },

    /// A quiz was started without prompts.
    #[error("quiz has no prompts")]
    NoPrompts,

    /// A configuration value is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
