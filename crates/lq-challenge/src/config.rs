//! Configuration for challenge sessions.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::{ChallengeError, ChallengeResult};

/// Smallest arcade grid that fits the starting body.
pub const MIN_GRID_SIZE: u32 = 8;

/// Tunables shared by quiz and arcade sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    /// Time budget in seconds.
    pub total_time_secs: u32,
    /// How long a quiz answer is revealed before moving on, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Interval between arcade movement steps, in milliseconds.
    pub tick_ms: u64,
    /// Side length of the square arcade grid.
    pub grid_size: u32,
    /// Collectibles needed to win an arcade run.
    pub target_score: u32,
    /// Prompts in one quiz run.
    pub questions_per_run: usize,
    /// RNG seed for target placement and question shuffling. Unset means
    /// a fresh OS-seeded run every time.
    pub seed: Option<u64>,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            total_time_secs: 60,
            reveal_delay_ms: 450,
            tick_ms: 120,
            grid_size: 20,
            target_score: 10,
            questions_per_run: 10,
            seed: None,
        }
    }
}

impl ChallengeConfig {
    /// Set the time budget.
    pub fn with_total_time(mut self, secs: u32) -> Self {
        self.total_time_secs = secs;
        self
    }

    /// Set the arcade step interval.
    pub fn with_tick(mut self, ms: u64) -> Self {
        self.tick_ms = ms;
        self
    }

    /// Set the arcade grid size.
    pub fn with_grid_size(mut self, size: u32) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the arcade target score.
    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    /// Fix the RNG seed so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The RNG a session should draw from: seeded when `seed` is set,
    /// otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> ChallengeResult<()> {
        if self.total_time_secs == 0 {
            return Err(ChallengeError::InvalidConfig(
                "total_time_secs must be positive".into(),
            ));
        }
        if self.tick_ms == 0 {
            return Err(ChallengeError::InvalidConfig("tick_ms must be positive".into()));
        }
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ChallengeError::InvalidConfig(format!(
                "grid_size must be at least {MIN_GRID_SIZE}"
            )));
        }
        if self.target_score == 0 {
            return Err(ChallengeError::InvalidConfig(
                "target_score must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = ChallengeConfig::default();
        assert_eq!(cfg.total_time_secs, 60);
        assert_eq!(cfg.reveal_delay_ms, 450);
        assert_eq!(cfg.tick_ms, 120);
        assert_eq!(cfg.grid_size, 20);
        assert_eq!(cfg.target_score, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = ChallengeConfig::default()
            .with_total_time(90)
            .with_tick(200)
            .with_seed(7);
        assert_eq!(cfg.total_time_secs, 90);
        assert_eq!(cfg.tick_ms, 200);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn seeded_rngs_repeat_and_unseeded_ones_differ() {
        use rand::Rng;

        let seeded = ChallengeConfig::default().with_seed(3);
        assert_eq!(seeded.rng().random::<u64>(), seeded.rng().random::<u64>());

        let unseeded = ChallengeConfig::default();
        assert_eq!(unseeded.seed, None);
        let draws: Vec<u64> = (0..4).map(|_| unseeded.rng().random()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(ChallengeConfig::default().with_total_time(0).validate().is_err());
        assert!(ChallengeConfig::default().with_tick(0).validate().is_err());
        assert!(ChallengeConfig::default().with_grid_size(5).validate().is_err());
        assert!(ChallengeConfig::default().with_target_score(0).validate().is_err());
    }
}
