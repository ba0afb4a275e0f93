//! The result every challenge session reports.

use serde::{Deserialize, Serialize};

/// Highest score a session can report.
pub const MAX_SESSION_SCORE: u32 = 10;

/// Outcome of one timed session: its score and the seconds it used.
///
/// Sessions guarantee `score <= MAX_SESSION_SCORE` and
/// `time_used_secs <= total time`; the progression engine trusts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    /// Points scored, 0-10.
    pub score: u32,
    /// Seconds spent, 0 up to the session's time budget.
    pub time_used_secs: u32,
}

impl SessionResult {
    /// Build a result, clamping the score to the session maximum and the
    /// time to the budget.
    pub fn new(score: u32, time_used_secs: u32, total_secs: u32) -> Self {
        Self {
            score: score.min(MAX_SESSION_SCORE),
            time_used_secs: time_used_secs.min(total_secs),
        }
    }
}
