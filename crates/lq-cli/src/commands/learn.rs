use clap::Subcommand;
use colored::Colorize;

use lq_core::Activity;

use super::{Context, parse_unit};

/// A finished learning activity, as typed on the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum LearnActivity {
    /// A vocabulary card was studied
    VocabStudied,
    /// The vocabulary quiz finished
    VocabQuiz {
        /// Questions answered correctly
        #[arg(short, long)]
        score: u32,
    },
    /// A grammar point was studied
    GrammarStudied,
    /// The sentence-reorder game finished
    Reorder {
        /// The sentence was put in the right order
        #[arg(long)]
        solved: bool,
    },
    /// The unit story was read
    StoryRead,
    /// The sentence-arrangement game finished
    Arrange {
        /// Sentences placed correctly
        #[arg(short, long)]
        correct: u32,
    },
}

impl From<LearnActivity> for Activity {
    fn from(activity: LearnActivity) -> Self {
        match activity {
            LearnActivity::VocabStudied => Activity::VocabStudied,
            LearnActivity::VocabQuiz { score } => Activity::VocabQuiz(score),
            LearnActivity::GrammarStudied => Activity::GrammarStudied,
            LearnActivity::Reorder { solved } => Activity::Reorder(solved),
            LearnActivity::StoryRead => Activity::StoryRead,
            LearnActivity::Arrange { correct } => Activity::Arrange(correct),
        }
    }
}

pub fn run(ctx: &Context, unit: u8, activity: LearnActivity) -> Result<(), String> {
    let unit = parse_unit(unit)?;
    let activity = Activity::from(activity);
    let mut store = ctx.store();

    let before: Vec<String> = store
        .progress()
        .unlocked_badges()
        .into_iter()
        .map(str::to_string)
        .collect();
    let progress = store.record_activity(unit, activity);

    println!(
        "  {unit}: +{} XP ({} XP in unit, {} total)",
        activity.xp(),
        progress.unit(unit).xp,
        progress.total_xp
    );
    for badge in progress.unlocked_badges() {
        if !before.iter().any(|b| b == badge) {
            println!("  {} {}", "Badge unlocked:".green().bold(), badge);
        }
    }
    Ok(())
}
