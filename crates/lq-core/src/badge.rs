//! Badge catalogue and evaluation.
//!
//! A badge is a key plus a predicate over the whole [`Progress`] aggregate.
//! Evaluation only ever unlocks; it never clears a badge.

use chrono::{DateTime, Utc};

use crate::progress::{BadgeState, Progress};

/// Any unit has studied at least one vocabulary card.
pub const FIRST_STEPS: &str = "FIRST_STEPS";
/// Any unit scored at least [`VOCAB_NOVICE_SCORE`] on its vocabulary quiz.
pub const VOCAB_NOVICE: &str = "VOCAB_NOVICE";
/// Any unit solved its sentence-reorder game.
pub const GRAMMAR_APPRENTICE: &str = "GRAMMAR_APPRENTICE";
/// Any unit's story was read.
pub const STORY_EXPLORER: &str = "STORY_EXPLORER";
/// Any unit recorded a challenge in [`SPEEDSTER_SECS`] seconds or less.
pub const SPEEDSTER: &str = "SPEEDSTER";
/// Any unit reached the maximum challenge score.
pub const PERFECT_10: &str = "PERFECT_10";
/// Any unit reached three stars.
pub const UNIT_MASTER: &str = "UNIT_MASTER";

/// Vocabulary quiz score required for [`VOCAB_NOVICE`].
pub const VOCAB_NOVICE_SCORE: u32 = 6;
/// Slowest challenge time accepted for [`SPEEDSTER`].
pub const SPEEDSTER_SECS: u32 = 40;
/// Maximum challenge score.
pub const PERFECT_SCORE: u32 = 10;

/// A predicate over the progress aggregate.
pub type BadgePredicate = fn(&Progress) -> bool;

/// One badge in the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct BadgeRule {
    /// Storage key.
    pub key: &'static str,
    /// Display title.
    pub title: &'static str,
    /// How the badge is earned.
    pub description: &'static str,
    /// Unlock condition.
    pub predicate: BadgePredicate,
}

/// The set of badge rules evaluated after every mutation.
#[derive(Debug, Clone)]
pub struct BadgePolicy {
    rules: Vec<BadgeRule>,
}

impl Default for BadgePolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                BadgeRule {
                    key: FIRST_STEPS,
                    title: "First Steps",
                    description: "Study your first vocabulary card",
                    predicate: |p| p.units().any(|u| u.vocab.studied >= 1),
                },
                BadgeRule {
                    key: VOCAB_NOVICE,
                    title: "Vocab Novice",
                    description: "Score 6 or more on a vocabulary quiz",
                    predicate: |p| p.units().any(|u| u.vocab.quiz_best >= VOCAB_NOVICE_SCORE),
                },
                BadgeRule {
                    key: GRAMMAR_APPRENTICE,
                    title: "Grammar Apprentice",
                    description: "Solve a sentence reorder game",
                    predicate: |p| p.units().any(|u| u.grammar.reorder_best >= 1),
                },
                BadgeRule {
                    key: STORY_EXPLORER,
                    title: "Story Explorer",
                    description: "Read a unit story",
                    predicate: |p| p.units().any(|u| u.text.read >= 1),
                },
                BadgeRule {
                    key: SPEEDSTER,
                    title: "Speedster",
                    description: "Finish a challenge in 40 seconds or less",
                    predicate: |p| {
                        p.units().any(|u| {
                            u.challenge
                                .best_time_sec
                                .is_some_and(|t| t > 0 && t <= SPEEDSTER_SECS)
                        })
                    },
                },
                BadgeRule {
                    key: PERFECT_10,
                    title: "Perfect 10",
                    description: "Score 10 in a challenge",
                    predicate: |p| p.units().any(|u| u.challenge.best_score >= PERFECT_SCORE),
                },
                BadgeRule {
                    key: UNIT_MASTER,
                    title: "Unit Master",
                    description: "Earn three stars in a unit",
                    predicate: |p| p.units().any(|u| u.stars >= 3),
                },
            ],
        }
    }
}

impl BadgePolicy {
    /// Add a rule. A rule with an existing key replaces it.
    pub fn with_rule(mut self, rule: BadgeRule) -> Self {
        self.rules.retain(|r| r.key != rule.key);
        self.rules.push(rule);
        self
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }

    /// All badge keys.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.key)
    }

    /// Keys whose predicate holds for `progress` and that are not yet unlocked.
    pub fn newly_satisfied(&self, progress: &Progress) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| !progress.is_unlocked(r.key) && (r.predicate)(progress))
            .map(|r| r.key)
            .collect()
    }

    /// Unlock every badge whose predicate holds, stamping it with `now`.
    ///
    /// Returns the keys unlocked by this call.
    pub fn evaluate(&self, progress: &mut Progress, now: DateTime<Utc>) -> Vec<&'static str> {
        let keys = self.newly_satisfied(progress);
        for key in &keys {
            progress.badges.insert(
                key.to_string(),
                BadgeState {
                    unlocked: true,
                    unlocked_at: Some(now),
                },
            );
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitId;

    fn unit_mut(p: &mut Progress, id: u8) -> &mut crate::progress::UnitProgress {
        p.by_unit.get_mut(&UnitId::new(id).unwrap()).unwrap()
    }

    #[test]
    fn nothing_unlocks_on_fresh_progress() {
        let mut p = Progress::new();
        assert!(BadgePolicy::default().evaluate(&mut p, Utc::now()).is_empty());
    }

    #[test]
    fn each_predicate_fires_on_any_unit() {
        let mut p = Progress::new();
        unit_mut(&mut p, 2).vocab.studied = 1;
        unit_mut(&mut p, 3).vocab.quiz_best = 6;
        unit_mut(&mut p, 4).grammar.reorder_best = 1;
        unit_mut(&mut p, 5).text.read = 1;
        unit_mut(&mut p, 6).challenge.best_time_sec = Some(40);
        unit_mut(&mut p, 1).challenge.best_score = 10;
        unit_mut(&mut p, 1).stars = 3;

        let mut unlocked = BadgePolicy::default().evaluate(&mut p, Utc::now());
        unlocked.sort_unstable();
        let mut all: Vec<_> = BadgePolicy::default().keys().collect();
        all.sort_unstable();
        assert_eq!(unlocked, all);
    }

    #[test]
    fn speedster_needs_a_recorded_time() {
        let mut p = Progress::new();
        unit_mut(&mut p, 1).challenge.best_time_sec = Some(0);
        assert!(BadgePolicy::default().newly_satisfied(&p).is_empty());
        unit_mut(&mut p, 1).challenge.best_time_sec = Some(41);
        assert!(BadgePolicy::default().newly_satisfied(&p).is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut p = Progress::new();
        unit_mut(&mut p, 1).text.read = 2;
        let policy = BadgePolicy::default();
        let first = policy.evaluate(&mut p, Utc::now());
        let snapshot = p.clone();
        let second = policy.evaluate(&mut p, Utc::now());
        assert_eq!(first, vec![STORY_EXPLORER]);
        assert!(second.is_empty());
        assert_eq!(p, snapshot);
    }

    #[test]
    fn evaluation_never_revokes() {
        let mut p = Progress::new();
        unit_mut(&mut p, 1).text.read = 1;
        let policy = BadgePolicy::default();
        policy.evaluate(&mut p, Utc::now());
        unit_mut(&mut p, 1).text.read = 0;
        policy.evaluate(&mut p, Utc::now());
        assert!(p.is_unlocked(STORY_EXPLORER));
    }

    #[test]
    fn custom_rule_extends_catalogue() {
        let policy = BadgePolicy::default().with_rule(BadgeRule {
            key: "XP_HOARDER",
            title: "XP Hoarder",
            description: "Earn 100 XP",
            predicate: |p| p.total_xp >= 100,
        });
        let mut p = Progress::with_badges(&policy);
        assert!(p.badges.contains_key("XP_HOARDER"));
        p.total_xp = 100;
        assert_eq!(policy.evaluate(&mut p, Utc::now()), vec!["XP_HOARDER"]);
    }
}
