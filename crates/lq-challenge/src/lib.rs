//! Timed challenge sessions for LearningQuest.
//!
//! Two session variants share one contract: a [`QuizSession`] of timed
//! multiple-choice prompts and an [`ArcadeSession`] on a grid. Both are
//! single-threaded state machines fed one event at a time by a
//! [`SessionDriver`] over a virtual-time [`TimerQueue`], and both end with
//! exactly one [`SessionResult`].

/// Arcade runs.
pub mod arcade;
/// The session countdown.
pub mod clock;
/// Session tunables.
pub mod config;
/// Error types.
pub mod error;
/// Session events.
pub mod event;
/// Level-to-variant lookup.
pub mod mode;
/// Quiz runs.
pub mod quiz;
/// Session contract and driver.
pub mod session;
/// Prompt supply.
pub mod source;
/// Virtual-time timers.
pub mod timer;

pub use arcade::{ArcadeOutcome, ArcadeSession, Cell, RandomPlacer, TargetPlacer};
pub use clock::SessionClock;
pub use config::ChallengeConfig;
pub use error::{ChallengeError, ChallengeResult};
pub use event::{Heading, SessionEvent};
pub use lq_core::SessionResult;
pub use mode::{ChallengeMode, LevelModes};
pub use quiz::{Prompt, QuizSession, QuizState};
pub use session::{ChallengeSession, DriverState, SessionDriver};
pub use source::{FixedSource, QuestionSource};
pub use timer::{TimerId, TimerQueue};
