//! Pure progress transitions.
//!
//! Every mutation of [`Progress`] is an [`Action`] applied by [`reduce`],
//! which returns a new aggregate and leaves the old one untouched. Derived
//! fields are recomputed here and nowhere else.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::badge::BadgePolicy;
use crate::progress::{
    BadgeState, ChallengeProgress, GrammarProgress, Progress, TextProgress, VocabProgress,
};
use crate::stars::StarPolicy;
use crate::unit::UnitId;

/// Sub-progress fields to merge into a unit. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitPatch {
    /// Replacement vocabulary counters.
    pub vocab: Option<VocabProgress>,
    /// Replacement grammar counters.
    pub grammar: Option<GrammarProgress>,
    /// Replacement reading counters.
    pub text: Option<TextProgress>,
    /// Replacement challenge track.
    pub challenge: Option<ChallengeProgress>,
}

impl UnitPatch {
    /// Patch only the vocabulary counters.
    pub fn vocab(vocab: VocabProgress) -> Self {
        Self {
            vocab: Some(vocab),
            ..Self::default()
        }
    }

    /// Patch only the grammar counters.
    pub fn grammar(grammar: GrammarProgress) -> Self {
        Self {
            grammar: Some(grammar),
            ..Self::default()
        }
    }

    /// Patch only the reading counters.
    pub fn text(text: TextProgress) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    /// Patch only the challenge track.
    pub fn challenge(challenge: ChallengeProgress) -> Self {
        Self {
            challenge: Some(challenge),
            ..Self::default()
        }
    }
}

/// A progress mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Grant XP to a unit and to the total.
    AddXp {
        /// Unit receiving the XP.
        unit: UnitId,
        /// XP granted.
        amount: u64,
    },
    /// Shallow-merge sub-progress fields into a unit.
    PatchUnit {
        /// Unit to patch.
        unit: UnitId,
        /// Fields to replace.
        patch: UnitPatch,
    },
    /// Unlock a badge directly.
    AwardBadge {
        /// Badge key.
        key: String,
    },
    /// Replace everything with fresh defaults.
    Reset,
    /// Replace everything with a previously saved snapshot.
    Load(Box<Progress>),
}

/// The policies used when recomputing derived fields.
#[derive(Debug, Clone, Default)]
pub struct ProgressRules {
    /// Star thresholds.
    pub stars: StarPolicy,
    /// Badge catalogue.
    pub badges: BadgePolicy,
}

impl ProgressRules {
    /// Set the star policy.
    pub fn with_stars(mut self, stars: StarPolicy) -> Self {
        self.stars = stars;
        self
    }

    /// Set the badge policy.
    pub fn with_badges(mut self, badges: BadgePolicy) -> Self {
        self.badges = badges;
        self
    }

    /// Fresh progress under these rules.
    pub fn fresh(&self) -> Progress {
        Progress::with_badges(&self.badges)
    }
}

/// Apply `action` to `progress`, returning the new aggregate.
pub fn reduce(
    progress: &Progress,
    action: Action,
    rules: &ProgressRules,
    now: DateTime<Utc>,
) -> Progress {
    match action {
        Action::AddXp { unit, amount } => {
            let mut next = progress.clone();
            next.by_unit.entry(unit).or_default().xp += amount;
            next.total_xp += amount;
            debug!(%unit, amount, total = next.total_xp, "added xp");
            recompute(next, rules, now)
        }
        Action::PatchUnit { unit, patch } => {
            let mut next = progress.clone();
            let record = next.by_unit.entry(unit).or_default();
            if let Some(vocab) = patch.vocab {
                record.vocab = vocab;
            }
            if let Some(grammar) = patch.grammar {
                record.grammar = grammar;
            }
            if let Some(text) = patch.text {
                record.text = text;
            }
            if let Some(challenge) = patch.challenge {
                record.challenge = challenge;
            }
            debug!(%unit, "patched unit");
            recompute(next, rules, now)
        }
        Action::AwardBadge { key } => {
            if progress.is_unlocked(&key) {
                return progress.clone();
            }
            let mut next = progress.clone();
            info!(badge = %key, "badge awarded");
            next.badges.insert(
                key,
                BadgeState {
                    unlocked: true,
                    unlocked_at: Some(now),
                },
            );
            next
        }
        Action::Reset => rules.fresh(),
        Action::Load(snapshot) => {
            let mut next = *snapshot;
            next.fill_missing_units();
            for key in rules.badges.keys() {
                next.badges.entry(key.to_string()).or_default();
            }
            recompute(next, rules, now)
        }
    }
}

/// Re-derive level stars, cleared levels and unit stars, then unlock any
/// newly satisfied badges.
///
/// Level stars and `cleared_levels` only ever rise.
pub fn recompute(mut progress: Progress, rules: &ProgressRules, now: DateTime<Utc>) -> Progress {
    for unit in progress.by_unit.values_mut() {
        let track = &mut unit.challenge;
        for stat in track.levels.values_mut() {
            stat.stars = stat.stars.max(rules.stars.level_stars(stat.best_score));
        }
        let unlocked = track.unlocked_count();
        track.cleared_levels = track.cleared_levels.max(unlocked - 1);
        unit.stars = rules.stars.unit_stars(unit);
    }
    for key in rules.badges.evaluate(&mut progress, now) {
        info!(badge = key, "badge unlocked");
    }
    progress
}
