//! Optional `lq.toml` overrides layered over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use lq_challenge::{ChallengeConfig, LevelModes};
use lq_core::{ProgressRules, StarPolicy};

/// File name looked up in the data directory when `--config` is not given.
pub const CONFIG_FILE: &str = "lq.toml";

/// Everything the binary can be configured with.
///
/// ```toml
/// [challenge]
/// total_time_secs = 90
///
/// [levels]
/// arcade_levels = [3, 6, 9]
///
/// [stars]
/// level_thresholds = [5, 8, 10]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LqConfig {
    pub challenge: ChallengeConfig,
    pub levels: LevelModes,
    pub stars: StarPolicy,
}

impl LqConfig {
    /// Load `explicit` if given (it must exist), else `<data_dir>/lq.toml` if present.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = data_dir.join(CONFIG_FILE);
                if !path.exists() {
                    debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        let config = Self::parse(&raw).map_err(|e| format!("{}: {e}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text and check the challenge values.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(raw).map_err(|e| format!("invalid config: {e}"))?;
        config.challenge.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Progress rules with the configured star policy.
    pub fn rules(&self) -> ProgressRules {
        ProgressRules::default().with_stars(self.stars.clone())
    }
}

/// `<platform data dir>/learningquest`, or `./learningquest` without one.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("learningquest")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(LqConfig::parse("").unwrap(), LqConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LqConfig::parse(
            "[challenge]\ntotal_time_secs = 90\n\n[levels]\narcade_levels = [3]\n",
        )
        .unwrap();
        assert_eq!(config.challenge.total_time_secs, 90);
        assert_eq!(config.challenge.reveal_delay_ms, 450);
        assert_eq!(config.levels.arcade_levels.len(), 1);
        assert_eq!(config.stars, StarPolicy::default());
    }

    #[test]
    fn seed_is_optional() {
        assert_eq!(LqConfig::default().challenge.seed, None);
        let config = LqConfig::parse("[challenge]\nseed = 7\n").unwrap();
        assert_eq!(config.challenge.seed, Some(7));
    }

    #[test]
    fn unusable_values_are_rejected() {
        assert!(LqConfig::parse("[challenge]\ntick_ms = 0\n").is_err());
        assert!(LqConfig::parse("[challenge\n").is_err());
    }

    #[test]
    fn missing_default_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LqConfig::load(None, dir.path()).unwrap(), LqConfig::default());
        assert!(LqConfig::load(Some(&dir.path().join("nope.toml")), dir.path()).is_err());
    }
}
