//! Merging a session result into a unit's challenge track.

use tracing::debug;

use crate::progress::{ChallengeProgress, LevelStat};
use crate::result::SessionResult;
use crate::stars::StarPolicy;
use crate::unlock::{TRACK_LENGTH, unlocked_count};

impl LevelStat {
    /// Fold one result into the stat: best score up, best time down, stars up.
    ///
    /// The first recorded time seeds `best_time_sec`.
    pub fn merged(self, result: SessionResult, policy: &StarPolicy) -> LevelStat {
        LevelStat {
            best_score: self.best_score.max(result.score),
            best_time_sec: Some(
                self.best_time_sec
                    .map_or(result.time_used_secs, |t| t.min(result.time_used_secs)),
            ),
            stars: self.stars.max(policy.level_stars(result.score)),
        }
    }
}

impl ChallengeProgress {
    /// The track after recording `result` on `level`.
    ///
    /// Updates the level stat, the unit-wide best score and time, and
    /// `cleared_levels` (never lowered, at least `unlocked - 1`).
    pub fn record(&self, level: u32, result: SessionResult, policy: &StarPolicy) -> Self {
        let mut next = self.clone();
        let stat = next.levels.get(&level).copied().unwrap_or_default();
        next.levels.insert(level, stat.merged(result, policy));

        next.best_score = next.best_score.max(result.score);
        next.best_time_sec = Some(
            next.best_time_sec
                .map_or(result.time_used_secs, |t| t.min(result.time_used_secs)),
        );

        let unlocked = next.unlocked_count();
        next.cleared_levels = next.cleared_levels.max(unlocked - 1);

        debug!(
            level,
            score = result.score,
            time = result.time_used_secs,
            unlocked,
            "recorded challenge result"
        );
        next
    }

    /// Playable levels on this track.
    pub fn unlocked_count(&self) -> u32 {
        unlocked_count(&self.levels, TRACK_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(score: u32, time: u32) -> SessionResult {
        SessionResult::new(score, time, 60)
    }

    #[test]
    fn first_result_seeds_the_level() {
        let track = ChallengeProgress::default().record(1, result(9, 45), &StarPolicy::default());
        assert_eq!(
            track.levels[&1],
            LevelStat {
                best_score: 9,
                best_time_sec: Some(45),
                stars: 2,
            }
        );
        assert_eq!(track.unlocked_count(), 2);
        assert_eq!(track.cleared_levels, 1);
        assert_eq!(track.best_score, 9);
        assert_eq!(track.best_time_sec, Some(45));
    }

    #[test]
    fn worse_result_keeps_the_best() {
        let policy = StarPolicy::default();
        let track = ChallengeProgress::default()
            .record(1, result(9, 45), &policy)
            .record(1, result(3, 50), &policy);
        assert_eq!(track.levels[&1].best_score, 9);
        assert_eq!(track.levels[&1].best_time_sec, Some(45));
        assert_eq!(track.levels[&1].stars, 2);
    }

    #[test]
    fn faster_weaker_run_lowers_only_time() {
        let policy = StarPolicy::default();
        let track = ChallengeProgress::default()
            .record(2, result(8, 50), &policy)
            .record(2, result(2, 12), &policy);
        assert_eq!(track.levels[&2].best_score, 8);
        assert_eq!(track.levels[&2].best_time_sec, Some(12));
        assert_eq!(track.best_time_sec, Some(12));
    }

    #[test]
    fn cleared_levels_never_drop() {
        let policy = StarPolicy::default();
        let mut track = ChallengeProgress {
            cleared_levels: 5,
            ..ChallengeProgress::default()
        };
        track = track.record(1, result(0, 60), &policy);
        assert_eq!(track.cleared_levels, 5);
    }

    proptest! {
        #[test]
        fn merge_is_max_min_max(
            prev_score in 0u32..=10,
            prev_time in proptest::option::of(0u32..=60),
            prev_stars in 0u32..=3,
            score in 0u32..=10,
            time in 0u32..=60,
        ) {
            let policy = StarPolicy::default();
            let prev = LevelStat {
                best_score: prev_score,
                best_time_sec: prev_time,
                stars: prev_stars,
            };
            let merged = prev.merged(result(score, time), &policy);
            prop_assert_eq!(merged.best_score, prev_score.max(score));
            prop_assert_eq!(merged.best_time_sec, Some(prev_time.map_or(time, |t| t.min(time))));
            prop_assert_eq!(merged.stars, prev_stars.max(policy.level_stars(score)));
        }
    }
}
