//! The progress store: the only way to change saved progress.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::persist::{self, KeyValueStore};
use crate::progress::{LevelStat, Progress};
use crate::reducer::{Action, ProgressRules, UnitPatch, reduce};
use crate::result::SessionResult;
use crate::unit::UnitId;

/// XP granted per point scored in a challenge.
pub const XP_PER_CHALLENGE_POINT: u64 = 2;

/// What recording a challenge changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The level's stat after the merge.
    pub stat: LevelStat,
    /// Playable levels on the unit's track after the merge.
    pub unlocked: u32,
    /// Badges unlocked by this result.
    pub new_badges: Vec<String>,
    /// XP granted.
    pub xp: u64,
}

/// Owns the progress aggregate and writes it through to storage.
///
/// Mutations are applied by the pure reducer, then persisted. A failed write
/// is logged and does not undo the mutation.
pub struct ProgressStore<S: KeyValueStore> {
    progress: Progress,
    storage: S,
    rules: ProgressRules,
    now: fn() -> DateTime<Utc>,
}

impl<S: KeyValueStore> std::fmt::Debug for ProgressStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("total_xp", &self.progress.total_xp)
            .field("badges", &self.progress.unlocked_badges().len())
            .finish()
    }
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Open a store over `storage` with default rules, restoring saved progress.
    pub fn open(storage: S) -> Self {
        Self::with_rules(storage, ProgressRules::default())
    }

    /// Open a store with custom rules. Missing or corrupt data yields fresh progress.
    pub fn with_rules(storage: S, rules: ProgressRules) -> Self {
        let now = Utc::now;
        let progress = match persist::restore(&storage) {
            Some(saved) => reduce(&rules.fresh(), Action::Load(Box::new(saved)), &rules, now()),
            None => rules.fresh(),
        };
        Self {
            progress,
            storage,
            rules,
            now,
        }
    }

    /// Use `now` for badge timestamps.
    pub fn with_clock(mut self, now: fn() -> DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Current progress.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Rules used for recomputation.
    pub fn rules(&self) -> &ProgressRules {
        &self.rules
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Grant XP to a unit.
    pub fn add_xp(&mut self, unit: UnitId, amount: u64) -> &Progress {
        self.dispatch(Action::AddXp { unit, amount })
    }

    /// Merge sub-progress fields into a unit.
    pub fn patch_unit(&mut self, unit: UnitId, patch: UnitPatch) -> &Progress {
        self.dispatch(Action::PatchUnit { unit, patch })
    }

    /// Unlock a badge; does nothing if it is already unlocked.
    pub fn award_badge(&mut self, key: &str) -> &Progress {
        self.dispatch(Action::AwardBadge {
            key: key.to_string(),
        })
    }

    /// Replace progress with a snapshot.
    pub fn load(&mut self, snapshot: Progress) -> &Progress {
        self.dispatch(Action::Load(Box::new(snapshot)))
    }

    /// Forget everything and clear durable storage.
    pub fn reset(&mut self) -> &Progress {
        self.progress = reduce(&self.progress, Action::Reset, &self.rules, (self.now)());
        if let Err(e) = persist::clear(&mut self.storage) {
            warn!(error = %e, "could not clear saved progress");
        }
        debug!("progress reset");
        &self.progress
    }

    /// Record a finished challenge session on `level` of `unit`.
    ///
    /// Merges the level stat and unit bests, then grants
    /// [`XP_PER_CHALLENGE_POINT`] XP per point scored.
    pub fn record_challenge(
        &mut self,
        unit: UnitId,
        level: u32,
        result: SessionResult,
    ) -> RecordOutcome {
        let before: Vec<String> = self
            .progress
            .unlocked_badges()
            .into_iter()
            .map(str::to_string)
            .collect();

        let track = self
            .progress
            .unit(unit)
            .challenge
            .record(level, result, &self.rules.stars);
        let stat = track.levels.get(&level).copied().unwrap_or_default();
        let unlocked = track.unlocked_count();
        self.patch_unit(unit, UnitPatch::challenge(track));

        let xp = u64::from(result.score) * XP_PER_CHALLENGE_POINT;
        self.add_xp(unit, xp);

        let new_badges = self
            .progress
            .unlocked_badges()
            .into_iter()
            .filter(|k| !before.iter().any(|b| b.as_str() == *k))
            .map(str::to_string)
            .collect();

        RecordOutcome {
            stat,
            unlocked,
            new_badges,
            xp,
        }
    }

    pub(crate) fn dispatch(&mut self, action: Action) -> &Progress {
        self.progress = reduce(&self.progress, action, &self.rules, (self.now)());
        if let Err(e) = persist::save(&mut self.storage, &self.progress) {
            warn!(error = %e, "could not save progress");
        }
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::{PERFECT_10, SPEEDSTER};
    use crate::persist::{FileStore, MemoryStore, STORAGE_KEY};

    fn unit(id: u8) -> UnitId {
        UnitId::new(id).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    #[test]
    fn opens_fresh_without_saved_data() {
        let store = ProgressStore::open(MemoryStore::new());
        assert_eq!(*store.progress(), Progress::new());
    }

    #[test]
    fn opens_fresh_on_corrupt_data() {
        let mut storage = MemoryStore::new();
        storage.set(STORAGE_KEY, "not json").unwrap();
        let store = ProgressStore::open(storage);
        assert_eq!(*store.progress(), Progress::new());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut store = ProgressStore::open(MemoryStore::new());
        store.add_xp(unit(1), 5);
        let saved = persist::restore(store.storage()).unwrap();
        assert_eq!(saved.total_xp, 5);
    }

    #[test]
    fn reopening_restores_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProgressStore::open(FileStore::new(dir.path()));
        store.add_xp(unit(3), 12);
        store.award_badge(SPEEDSTER);
        let expected = store.progress().clone();

        let reopened = ProgressStore::open(FileStore::new(dir.path()));
        assert_eq!(*reopened.progress(), expected);
    }

    #[test]
    fn reset_clears_storage() {
        let mut store = ProgressStore::open(MemoryStore::new());
        store.add_xp(unit(1), 5);
        store.reset();
        assert_eq!(*store.progress(), Progress::new());
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn award_uses_store_clock() {
        let mut store = ProgressStore::open(MemoryStore::new()).with_clock(fixed_now);
        store.award_badge(PERFECT_10);
        assert_eq!(
            store.progress().badges[PERFECT_10].unlocked_at,
            Some(fixed_now())
        );
    }

    #[test]
    fn quiz_result_scenario() {
        let mut store = ProgressStore::open(MemoryStore::new());
        let outcome = store.record_challenge(unit(1), 1, SessionResult::new(9, 45, 60));

        assert_eq!(
            outcome.stat,
            LevelStat {
                best_score: 9,
                best_time_sec: Some(45),
                stars: 2,
            }
        );
        assert_eq!(outcome.unlocked, 2);
        assert_eq!(outcome.xp, 18);

        let u = store.progress().unit(unit(1));
        assert_eq!(u.challenge.cleared_levels, 1);
        assert_eq!(u.challenge.levels[&1], outcome.stat);
        assert_eq!(store.progress().total_xp, 18);
        assert!(!store.progress().is_unlocked(SPEEDSTER));
    }

    #[test]
    fn perfect_fast_run_unlocks_two_badges_at_once() {
        let mut store = ProgressStore::open(MemoryStore::new());
        let outcome = store.record_challenge(unit(2), 2, SessionResult::new(10, 40, 60));
        let mut badges = outcome.new_badges.clone();
        badges.sort();
        assert_eq!(badges, vec![PERFECT_10.to_string(), SPEEDSTER.to_string()]);
        assert_eq!(outcome.stat.stars, 3);
    }

    #[test]
    fn loaded_snapshot_is_recomputed() {
        let mut snapshot = Progress::new();
        snapshot.by_unit.get_mut(&unit(5)).unwrap().vocab.quiz_best = 20;
        let mut store = ProgressStore::open(MemoryStore::new());
        store.load(snapshot);
        assert_eq!(store.progress().unit(unit(5)).stars, 3);
        assert!(store.progress().is_unlocked("UNIT_MASTER"));
    }
}
