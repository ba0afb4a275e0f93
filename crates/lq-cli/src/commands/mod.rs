pub mod badges;
pub mod learn;
pub mod levels;
pub mod play;
pub mod record;
pub mod reset;
pub mod status;

use std::path::{Path, PathBuf};

use colored::Colorize;

use lq_core::{FileStore, MAX_SESSION_SCORE, ProgressStore, RecordOutcome, UnitId, check_level};

use crate::config::LqConfig;

/// What every command needs: where progress lives and how it is scored.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: LqConfig,
}

impl Context {
    pub fn load(data_dir: Option<PathBuf>, config: Option<&Path>) -> Result<Self, String> {
        let data_dir = data_dir.unwrap_or_else(crate::config::default_data_dir);
        let config = LqConfig::load(config, &data_dir)?;
        Ok(Self { data_dir, config })
    }

    /// Open the progress store in the data directory.
    pub fn store(&self) -> ProgressStore<FileStore> {
        ProgressStore::with_rules(FileStore::new(&self.data_dir), self.config.rules())
    }
}

pub fn parse_unit(unit: u8) -> Result<UnitId, String> {
    UnitId::new(unit).map_err(|e| e.to_string())
}

/// A level on the track that the unit has unlocked.
fn playable_level(
    store: &ProgressStore<FileStore>,
    unit: UnitId,
    level: u32,
) -> Result<u32, String> {
    let level = check_level(level).map_err(|e| e.to_string())?;
    let unlocked = store.progress().unit(unit).challenge.unlocked_count();
    if level > unlocked {
        return Err(format!(
            "level {level} of {unit} is locked (levels 1-{unlocked} are open)"
        ));
    }
    Ok(level)
}

/// Filled and empty stars, e.g. `★★☆`.
pub fn star_bar(stars: u32, max: u32) -> String {
    let filled = stars.min(max) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(max as usize - filled))
}

fn print_outcome(outcome: &RecordOutcome) {
    let time = outcome
        .stat
        .best_time_sec
        .map_or_else(|| "-".to_string(), |t| format!("{t}s"));
    println!(
        "  Best: {}/{MAX_SESSION_SCORE} in {}  {}",
        outcome.stat.best_score,
        time,
        star_bar(outcome.stat.stars, lq_core::stars::MAX_STARS).yellow()
    );
    println!("  +{} XP, {} levels open", outcome.xp, outcome.unlocked);
    for badge in &outcome.new_badges {
        println!("  {} {}", "Badge unlocked:".green().bold(), badge);
    }
}
