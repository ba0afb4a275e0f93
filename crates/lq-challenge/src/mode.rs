//! Which session variant each level plays.

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// The session variant a level uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeMode {
    /// Timed multiple-choice questions.
    Quiz,
    /// Real-time grid game.
    Arcade,
}

impl fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeMode::Quiz => write!(f, "quiz"),
            ChallengeMode::Arcade => write!(f, "arcade"),
        }
    }
}

/// Level-number lookup for session variants. Levels not listed play as quizzes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelModes {
    /// Levels played as arcade runs.
    pub arcade_levels: BTreeSet<u32>,
}

impl Default for LevelModes {
    fn default() -> Self {
        Self {
            arcade_levels: [2, 4, 6].into_iter().collect(),
        }
    }
}

impl LevelModes {
    /// Replace the arcade level set.
    pub fn with_arcade_levels(mut self, levels: impl IntoIterator<Item = u32>) -> Self {
        self.arcade_levels = levels.into_iter().collect();
        self
    }

    /// The variant `level` plays.
    pub fn mode_for(&self, level: u32) -> ChallengeMode {
        if self.arcade_levels.contains(&level) {
            ChallengeMode::Arcade
        } else {
            ChallengeMode::Quiz
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arcade_levels() {
        let modes = LevelModes::default();
        let arcade: Vec<u32> = (1..=10)
            .filter(|l| modes.mode_for(*l) == ChallengeMode::Arcade)
            .collect();
        assert_eq!(arcade, vec![2, 4, 6]);
    }

    #[test]
    fn custom_levels() {
        let modes = LevelModes::default().with_arcade_levels([9]);
        assert_eq!(modes.mode_for(2), ChallengeMode::Quiz);
        assert_eq!(modes.mode_for(9), ChallengeMode::Arcade);
        assert_eq!(ChallengeMode::Arcade.to_string(), "arcade");
    }
}
