//! The progress aggregate and its per-unit records.
//!
//! Derived fields (`UnitProgress::stars`, `LevelStat::stars`, the badge set)
//! are stored for display and persistence, but only the reducer in
//! [`crate::reducer`] ever writes them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::badge::BadgePolicy;
use crate::unit::UnitId;

/// Vocabulary sub-progress for one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabProgress {
    /// Vocabulary cards studied.
    pub studied: u32,
    /// Best vocabulary quiz score.
    pub quiz_best: u32,
}

/// Grammar sub-progress for one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarProgress {
    /// Grammar points studied.
    pub studied: u32,
    /// Best sentence-reorder result (1 once solved).
    pub reorder_best: u32,
}

/// Reading sub-progress for one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProgress {
    /// Times the unit story was read.
    pub read: u32,
    /// Best sentence-arrangement result.
    pub arrange_best: u32,
}

/// Best results for one challenge level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStat {
    /// Highest score reached on this level (0-10).
    pub best_score: u32,
    /// Fastest recorded run in seconds; `None` until a session is recorded.
    pub best_time_sec: Option<u32>,
    /// Star rating (0-3), never lowered.
    pub stars: u32,
}

/// Challenge track state for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeProgress {
    /// Levels cleared so far; at least `unlocked_count - 1`.
    pub cleared_levels: u32,
    /// Fastest run across all levels; `None` until a session is recorded.
    pub best_time_sec: Option<u32>,
    /// Highest score across all levels.
    pub best_score: u32,
    /// Per-level history keyed by level number.
    pub levels: BTreeMap<u32, LevelStat>,
}

/// Everything recorded for one learning unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitProgress {
    /// Experience points earned in this unit.
    pub xp: u64,
    /// Derived mastery rating (0-3).
    pub stars: u32,
    /// Vocabulary counters.
    pub vocab: VocabProgress,
    /// Grammar counters.
    pub grammar: GrammarProgress,
    /// Reading counters.
    pub text: TextProgress,
    /// Challenge track.
    pub challenge: ChallengeProgress,
}

/// Unlock state of one badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeState {
    /// Whether the badge has been earned.
    pub unlocked: bool,
    /// When the badge was earned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// The single progress aggregate for one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Per-unit records; every unit is always present.
    pub by_unit: BTreeMap<UnitId, UnitProgress>,
    /// Badge states keyed by badge key.
    pub badges: BTreeMap<String, BadgeState>,
    /// Sum of every XP grant ever applied.
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
}

impl Progress {
    /// Fresh progress: all counters zero, every catalogue badge locked.
    pub fn new() -> Self {
        Self::with_badges(&BadgePolicy::default())
    }

    /// Fresh progress with a locked entry for every badge in `policy`.
    pub fn with_badges(policy: &BadgePolicy) -> Self {
        Self {
            by_unit: UnitId::all()
                .map(|id| (id, UnitProgress::default()))
                .collect(),
            badges: policy
                .keys()
                .map(|key| (key.to_string(), BadgeState::default()))
                .collect(),
            total_xp: 0,
        }
    }

    /// The record for one unit.
    pub fn unit(&self, id: UnitId) -> &UnitProgress {
        // Every unit is seeded on construction and restored on load.
        self.by_unit.get(&id).unwrap_or(&EMPTY_UNIT)
    }

    /// Whether the badge with `key` is unlocked.
    pub fn is_unlocked(&self, key: &str) -> bool {
        self.badges.get(key).is_some_and(|b| b.unlocked)
    }

    /// Keys of every unlocked badge.
    pub fn unlocked_badges(&self) -> Vec<&str> {
        self.badges
            .iter()
            .filter(|(_, b)| b.unlocked)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Iterate over all unit records.
    pub fn units(&self) -> impl Iterator<Item = &UnitProgress> {
        self.by_unit.values()
    }

    /// Add default records for any unit missing from a restored snapshot.
    pub(crate) fn fill_missing_units(&mut self) {
        for id in UnitId::all() {
            self.by_unit.entry(id).or_default();
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

static EMPTY_UNIT: UnitProgress = UnitProgress {
    xp: 0,
    stars: 0,
    vocab: VocabProgress {
        studied: 0,
        quiz_best: 0,
    },
    grammar: GrammarProgress {
        studied: 0,
        reorder_best: 0,
    },
    text: TextProgress {
        read: 0,
        arrange_best: 0,
    },
    challenge: ChallengeProgress {
        cleared_levels: 0,
        best_time_sec: None,
        best_score: 0,
        levels: BTreeMap::new(),
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_progress_has_every_unit() {
        let p = Progress::new();
        assert_eq!(p.by_unit.len(), 6);
        assert_eq!(p.total_xp, 0);
        assert!(p.units().all(|u| *u == UnitProgress::default()));
    }

    #[test]
    fn fresh_progress_has_locked_badges() {
        let p = Progress::new();
        assert_eq!(p.badges.len(), 7);
        assert!(p.unlocked_badges().is_empty());
        assert!(!p.is_unlocked("PERFECT_10"));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let mut p = Progress::new();
        let unit = UnitId::new(1).unwrap();
        p.by_unit.get_mut(&unit).unwrap().challenge.levels.insert(
            1,
            LevelStat {
                best_score: 9,
                best_time_sec: Some(45),
                stars: 2,
            },
        );
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"byUnit\""));
        assert!(json.contains("\"totalXP\""));
        assert!(json.contains("\"quizBest\""));
        assert!(json.contains("\"bestTimeSec\":45"));
    }

    #[test]
    fn missing_units_are_filled() {
        let mut p = Progress::new();
        p.by_unit.clear();
        p.fill_missing_units();
        assert_eq!(p.by_unit.len(), 6);
    }
}
