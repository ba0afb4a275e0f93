use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use tracing::debug;

use lq_challenge::{
    ChallengeMode, ChallengeSession, QuestionSource, QuizSession, QuizState, SessionDriver,
    SessionEvent, SessionResult,
};
use lq_core::UnitId;

use super::{Context, parse_unit, playable_level, print_outcome};
use crate::content::{DemoBank, unit_title};

pub fn run(ctx: &Context, unit: u8, level: u32) -> Result<(), String> {
    let unit = parse_unit(unit)?;
    let mut store = ctx.store();
    let level = playable_level(&store, unit, level)?;
    let mode = ctx.config.levels.mode_for(level);

    println!(
        "  {} {} level {} ({mode})",
        unit.to_string().bold(),
        unit_title(unit).dimmed(),
        level
    );

    let result = match mode {
        ChallengeMode::Quiz => play_quiz(ctx, unit)?,
        ChallengeMode::Arcade => crate::tui::play_arcade(&ctx.config.challenge)?,
    };
    let Some(result) = result else {
        println!("  Run abandoned, nothing recorded.");
        return Ok(());
    };

    println!();
    println!(
        "  {} {} points in {}s",
        "Finished:".bold(),
        result.score,
        result.time_used_secs
    );
    let outcome = store.record_challenge(unit, level, result);
    print_outcome(&outcome);
    Ok(())
}

/// Run a quiz on stdin. Returns `None` if the player quits or input ends.
fn play_quiz(ctx: &Context, unit: UnitId) -> Result<Option<SessionResult>, String> {
    let config = &ctx.config.challenge;
    let prompts = DemoBank::new(config.rng())
        .questions(unit, config.questions_per_run);
    let session = QuizSession::new(prompts, config).map_err(|e| e.to_string())?;
    let mut driver = SessionDriver::new(session);

    let started = Instant::now();
    driver.start();
    println!(
        "  {} questions, {}s. Type a letter to answer, q to quit.",
        driver.session().len(),
        driver.session().remaining_secs()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while driver.is_running() {
        let Some(prompt) = driver.session().current().cloned() else {
            break;
        };
        println!();
        println!(
            "  {} {}",
            format!(
                "[{}/{}  {}s left]",
                driver.session().position() + 1,
                driver.session().len(),
                driver.session().remaining_secs()
            )
            .dimmed(),
            prompt.text.bold()
        );
        for (i, choice) in prompt.choices.iter().enumerate() {
            println!("    {}) {choice}", choice_letter(i));
        }
        print!("  > ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            driver.abandon();
            return Ok(None);
        };
        let line = line.map_err(|e| format!("cannot read answer: {e}"))?;
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            driver.abandon();
            return Ok(None);
        }

        // Time passed while waiting counts, and may end the run first.
        if let Some(result) = driver.advance_to(elapsed_ms(started)) {
            println!("  {}", "Time is up!".red().bold());
            return Ok(Some(result));
        }

        let Some(choice) = parse_choice(answer, prompt.choices.len()) else {
            println!(
                "  Answer with a letter from a to {}.",
                choice_letter(prompt.choices.len() - 1)
            );
            continue;
        };
        driver.input(SessionEvent::Answer(choice));

        if let QuizState::Revealing { correct, .. } = driver.session().state() {
            if correct {
                println!("  {}", "Correct!".green());
            } else {
                println!(
                    "  {} The answer is {}) {}",
                    "Not quite.".yellow(),
                    choice_letter(prompt.correct_index),
                    prompt.choices[prompt.correct_index]
                );
            }
        }

        std::thread::sleep(Duration::from_millis(config.reveal_delay_ms));
        let now = elapsed_ms(started).max(driver.now_ms() + config.reveal_delay_ms);
        if let Some(result) = driver.advance_to(now) {
            return Ok(Some(result));
        }
    }

    debug!(state = ?driver.state(), "quiz loop ended");
    Ok(driver.result())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn choice_letter(index: usize) -> char {
    char::from(b'a' + (index % 26) as u8)
}

/// `"b"` -> 1, if within `len` choices.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    let mut chars = answer.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() || !c.is_ascii_lowercase() {
        return None;
    }
    let index = (c as u8 - b'a') as usize;
    (index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_choices() {
        assert_eq!(parse_choice("a", 4), Some(0));
        assert_eq!(parse_choice("D", 4), Some(3));
        assert_eq!(parse_choice("e", 4), None);
        assert_eq!(parse_choice("ab", 4), None);
        assert_eq!(parse_choice("", 4), None);
        assert_eq!(parse_choice("1", 4), None);
        assert_eq!(choice_letter(2), 'c');
    }
}
