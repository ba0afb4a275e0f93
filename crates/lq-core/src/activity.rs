//! Completion hooks for the learning screens.
//!
//! Each helper is built only from [`ProgressStore::add_xp`] and
//! [`ProgressStore::patch_unit`], so recomputation and persistence happen
//! exactly as for any other mutation.

use crate::persist::KeyValueStore;
use crate::progress::Progress;
use crate::reducer::UnitPatch;
use crate::store::ProgressStore;
use crate::unit::UnitId;

/// XP for studying a card, studying a grammar point, or reading the story.
pub const STUDY_XP: u64 = 5;
/// XP for solving the sentence-reorder game.
pub const REORDER_SOLVED_XP: u64 = 5;
/// XP for attempting the sentence-reorder game without solving it.
pub const REORDER_ATTEMPT_XP: u64 = 2;

/// A finished learning activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// A vocabulary card was studied.
    VocabStudied,
    /// The vocabulary quiz finished with this score.
    VocabQuiz(u32),
    /// A grammar point was studied.
    GrammarStudied,
    /// The sentence-reorder game finished, solved or not.
    Reorder(bool),
    /// The unit story was read.
    StoryRead,
    /// The sentence-arrangement game finished with this many correct.
    Arrange(u32),
}

impl Activity {
    /// XP the activity grants.
    pub fn xp(self) -> u64 {
        match self {
            Activity::VocabStudied | Activity::GrammarStudied | Activity::StoryRead => STUDY_XP,
            Activity::VocabQuiz(score) | Activity::Arrange(score) => u64::from(score),
            Activity::Reorder(true) => REORDER_SOLVED_XP,
            Activity::Reorder(false) => REORDER_ATTEMPT_XP,
        }
    }
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Record a finished learning activity for `unit`: grant its XP, then
    /// merge its counters.
    pub fn record_activity(&mut self, unit: UnitId, activity: Activity) -> &Progress {
        self.add_xp(unit, activity.xp());

        let current = self.progress().unit(unit);
        let (mut vocab, mut grammar, mut text) = (current.vocab, current.grammar, current.text);
        let patch = match activity {
            Activity::VocabStudied => {
                vocab.studied += 1;
                UnitPatch::vocab(vocab)
            }
            Activity::VocabQuiz(score) => {
                vocab.quiz_best = vocab.quiz_best.max(score);
                UnitPatch::vocab(vocab)
            }
            Activity::GrammarStudied => {
                grammar.studied += 1;
                UnitPatch::grammar(grammar)
            }
            Activity::Reorder(solved) => {
                grammar.reorder_best = grammar.reorder_best.max(u32::from(solved));
                UnitPatch::grammar(grammar)
            }
            Activity::StoryRead => {
                text.read += 1;
                UnitPatch::text(text)
            }
            Activity::Arrange(correct) => {
                text.arrange_best = text.arrange_best.max(correct);
                UnitPatch::text(text)
            }
        };
        self.patch_unit(unit, patch)
    }
}
