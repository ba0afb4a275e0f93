//! Star ratings for challenge levels and whole units.

use serde::{Deserialize, Serialize};

use crate::progress::UnitProgress;

/// Highest star rating for a level or unit.
pub const MAX_STARS: u32 = 3;

/// Tunable star thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarPolicy {
    /// Minimum challenge score for 1, 2 and 3 stars on a level.
    pub level_thresholds: [u32; 3],
    /// Mastery points needed per unit star.
    pub points_per_star: u32,
    /// The unit's best challenge score counts `1 / challenge_divisor` mastery points.
    pub challenge_divisor: u32,
}

impl Default for StarPolicy {
    fn default() -> Self {
        Self {
            level_thresholds: [4, 7, 10],
            points_per_star: 5,
            challenge_divisor: 5,
        }
    }
}

impl StarPolicy {
    /// Set the level thresholds for 1, 2 and 3 stars.
    pub fn with_level_thresholds(mut self, thresholds: [u32; 3]) -> Self {
        self.level_thresholds = thresholds;
        self
    }

    /// Stars earned by a single challenge score.
    pub fn level_stars(&self, score: u32) -> u32 {
        self.level_thresholds
            .iter()
            .filter(|&&threshold| score >= threshold)
            .count() as u32
    }

    /// Stars for a unit, from its practice bests plus a fraction of its best challenge score.
    ///
    /// Mastery is `quizBest + reorderBest + arrangeBest + bestScore / challenge_divisor`,
    /// and each `points_per_star` of mastery is one star. Integer arithmetic is
    /// done on mastery scaled by `challenge_divisor` so no fraction is lost.
    pub fn unit_stars(&self, unit: &UnitProgress) -> u32 {
        let divisor = u64::from(self.challenge_divisor.max(1));
        let per_star = u64::from(self.points_per_star.max(1));
        let practice = u64::from(unit.vocab.quiz_best)
            + u64::from(unit.grammar.reorder_best)
            + u64::from(unit.text.arrange_best);
        let scaled = practice * divisor + u64::from(unit.challenge.best_score);
        (scaled / (per_star * divisor)).min(u64::from(MAX_STARS)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_stars_follow_thresholds() {
        let policy = StarPolicy::default();
        assert_eq!(policy.level_stars(0), 0);
        assert_eq!(policy.level_stars(3), 0);
        assert_eq!(policy.level_stars(4), 1);
        assert_eq!(policy.level_stars(7), 2);
        assert_eq!(policy.level_stars(9), 2);
        assert_eq!(policy.level_stars(10), 3);
    }

    #[test]
    fn level_stars_are_monotonic() {
        let policy = StarPolicy::default();
        for score in 0..10 {
            assert!(policy.level_stars(score) <= policy.level_stars(score + 1));
        }
    }

    #[test]
    fn retuned_thresholds() {
        let policy = StarPolicy::default().with_level_thresholds([4, 7, 9]);
        assert_eq!(policy.level_stars(9), 3);
    }

    #[test]
    fn unit_stars_from_mastery() {
        let policy = StarPolicy::default();
        let mut unit = UnitProgress::default();
        assert_eq!(policy.unit_stars(&unit), 0);

        unit.vocab.quiz_best = 4;
        assert_eq!(policy.unit_stars(&unit), 0);

        // 4 + 10/5 = 6 mastery points
        unit.challenge.best_score = 10;
        assert_eq!(policy.unit_stars(&unit), 1);

        unit.vocab.quiz_best = 8;
        unit.grammar.reorder_best = 1;
        unit.text.arrange_best = 4;
        // 8 + 1 + 4 + 2 = 15
        assert_eq!(policy.unit_stars(&unit), 3);
    }

    #[test]
    fn unit_stars_cap_at_three() {
        let policy = StarPolicy::default();
        let mut unit = UnitProgress::default();
        unit.vocab.quiz_best = 100;
        assert_eq!(policy.unit_stars(&unit), MAX_STARS);
    }

    #[test]
    fn challenge_fraction_is_not_rounded_away() {
        let policy = StarPolicy::default();
        let mut unit = UnitProgress::default();
        // 4 + 5/5 = 5 mastery points
        unit.vocab.quiz_best = 4;
        unit.challenge.best_score = 5;
        assert_eq!(policy.unit_stars(&unit), 1);
        // 4 + 4/5 < 5
        unit.challenge.best_score = 4;
        assert_eq!(policy.unit_stars(&unit), 0);
    }
}
