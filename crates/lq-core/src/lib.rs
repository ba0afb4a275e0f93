//! Progression engine for LearningQuest.
//!
//! Turns challenge session results and learning activities into durable
//! per-unit progress: per-level best scores and times, star ratings, level
//! unlocking, badges, and experience points. All mutation goes through
//! [`ProgressStore`], which applies the pure [`reducer`] and persists the
//! result to a [`KeyValueStore`].

/// Learning activity completion hooks.
pub mod activity;
/// Badge catalogue and evaluation.
pub mod badge;
/// Error types for the progression engine.
pub mod error;
/// Durable storage adapters.
pub mod persist;
/// The progress aggregate and per-unit records.
pub mod progress;
/// Merging session results into a challenge track.
pub mod record;
/// Pure progress transitions.
pub mod reducer;
/// The session result contract.
pub mod result;
/// Star thresholds.
pub mod stars;
/// The progress store.
pub mod store;
/// Learning unit identifiers.
pub mod unit;
/// Level unlocking.
pub mod unlock;

pub use activity::Activity;
pub use badge::{BadgePolicy, BadgeRule};
pub use error::{ProgressError, ProgressResult};
pub use persist::{FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};
pub use progress::{
    BadgeState, ChallengeProgress, GrammarProgress, LevelStat, Progress, TextProgress,
    UnitProgress, VocabProgress,
};
pub use reducer::{Action, ProgressRules, UnitPatch};
pub use result::{MAX_SESSION_SCORE, SessionResult};
pub use stars::StarPolicy;
pub use store::{ProgressStore, RecordOutcome};
pub use unit::UnitId;
pub use unlock::{LevelSlot, TRACK_LENGTH, check_level, level_grid, unlocked_count};
