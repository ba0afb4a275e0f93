//! Level unlocking along a unit's challenge track.

use std::collections::BTreeMap;

use crate::error::{ProgressError, ProgressResult};
use crate::progress::LevelStat;

/// Number of levels in every unit's challenge track.
pub const TRACK_LENGTH: u32 = 10;

/// Stars a level needs before the next one opens.
pub const UNLOCK_STARS: u32 = 2;

/// Check that `level` lies on the challenge track.
pub fn check_level(level: u32) -> ProgressResult<u32> {
    if (1..=TRACK_LENGTH).contains(&level) {
        Ok(level)
    } else {
        Err(ProgressError::InvalidLevel(level))
    }
}

/// How many levels of the track are playable.
///
/// Walks levels `1..=track_len` in order; each level with at least
/// [`UNLOCK_STARS`] opens the next one. The walk stops at the first level
/// below that, so stats recorded for later levels never unlock anything.
/// Level 1 is always playable.
pub fn unlocked_count(levels: &BTreeMap<u32, LevelStat>, track_len: u32) -> u32 {
    let track_len = track_len.max(1);
    let mut unlocked = 1;
    for level in 1..=track_len {
        let stars = levels.get(&level).map_or(0, |s| s.stars);
        if stars < UNLOCK_STARS {
            break;
        }
        unlocked = (level + 1).min(track_len);
    }
    unlocked
}

/// One row of a level-select grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSlot {
    /// Level number, starting at 1.
    pub level: u32,
    /// Stars recorded for the level.
    pub stars: u32,
    /// Whether the level can be played.
    pub unlocked: bool,
}

/// Per-level stars and lock state for display.
pub fn level_grid(levels: &BTreeMap<u32, LevelStat>, track_len: u32) -> Vec<LevelSlot> {
    let unlocked = unlocked_count(levels, track_len);
    (1..=track_len)
        .map(|level| LevelSlot {
            level,
            stars: levels.get(&level).map_or(0, |s| s.stars),
            unlocked: level <= unlocked,
        })
        .collect()
}
