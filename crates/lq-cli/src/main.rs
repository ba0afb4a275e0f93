//! Terminal host for LearningQuest: play challenges and track progress.

mod commands;
mod config;
mod content;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Context;
use commands::learn::LearnActivity;

#[derive(Parser)]
#[command(
    name = "lq",
    about = "LearningQuest: timed language challenges with stars, levels and badges",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding saved progress and lq.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: lq.toml in the data directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show XP, stars and challenge bests for every unit
    Status,

    /// Show a unit's level track
    Levels {
        /// Unit number (1-6)
        #[arg(short, long)]
        unit: u8,
    },

    /// List badges and when they were earned
    Badges,

    /// Play a challenge level (quiz or arcade, depending on the level)
    Play {
        /// Unit number (1-6)
        #[arg(short, long)]
        unit: u8,

        /// Level number (1-10)
        #[arg(short, long)]
        level: u32,
    },

    /// Record a challenge result played elsewhere
    Record {
        /// Unit number (1-6)
        #[arg(short, long)]
        unit: u8,

        /// Level number (1-10)
        #[arg(short, long)]
        level: u32,

        /// Points scored (capped at 10)
        #[arg(short, long)]
        score: u32,

        /// Seconds used
        #[arg(short, long)]
        time: u32,
    },

    /// Record a finished learning activity
    Learn {
        /// Unit number (1-6)
        #[arg(short, long)]
        unit: u8,

        #[command(subcommand)]
        activity: LearnActivity,
    },

    /// Delete all saved progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result =
        Context::load(cli.data_dir, cli.config.as_deref()).and_then(|ctx| match cli.command {
            Commands::Status => commands::status::run(&ctx),
            Commands::Levels { unit } => commands::levels::run(&ctx, unit),
            Commands::Badges => commands::badges::run(&ctx),
            Commands::Play { unit, level } => commands::play::run(&ctx, unit, level),
            Commands::Record {
                unit,
                level,
                score,
                time,
            } => commands::record::run(&ctx, unit, level, score, time),
            Commands::Learn { unit, activity } => commands::learn::run(&ctx, unit, activity),
            Commands::Reset { yes } => commands::reset::run(&ctx, yes),
        });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
