//! Full runs: drive a session to its result and record it on a progress store.

use std::collections::VecDeque;

use lq_challenge::{
    ArcadeOutcome, ArcadeSession, Cell, ChallengeConfig, FixedSource, Heading, Prompt,
    QuestionSource, QuizSession, SessionDriver, SessionEvent, SessionResult, TargetPlacer,
};
use lq_core::badge::{PERFECT_10, SPEEDSTER};
use lq_core::{LevelStat, MemoryStore, ProgressStore, UnitId};

#[derive(Debug)]
struct TargetAhead;

impl TargetPlacer for TargetAhead {
    fn place(&mut self, _size: u32, body: &VecDeque<Cell>) -> Option<Cell> {
        Some(body[0].step(Heading::Right))
    }
}

#[derive(Debug)]
struct FarCorner;

impl TargetPlacer for FarCorner {
    fn place(&mut self, size: u32, _body: &VecDeque<Cell>) -> Option<Cell> {
        Some(Cell::new(size as i32 - 1, 0))
    }
}

fn ten_prompts() -> Vec<Prompt> {
    (0..10)
        .map(|i| {
            Prompt::new(
                format!("word {i}"),
                vec!["w".into(), "x".into(), "y".into(), "z".into()],
                i % 4,
            )
            .unwrap()
        })
        .collect()
}

#[test]
fn quiz_run_nine_of_ten_in_45_seconds() {
    let unit = UnitId::new(1).unwrap();
    let mut source = FixedSource::new(ten_prompts());
    let prompts = source.questions(unit, 10);
    let mut driver =
        SessionDriver::new(QuizSession::new(prompts.clone(), &ChallengeConfig::default()).unwrap());
    driver.start();

    let mut result = None;
    for (i, prompt) in prompts.iter().enumerate() {
        assert_eq!(driver.advance_to(4500 * (i as u64 + 1)), None);
        let choice = if i == 3 {
            (prompt.correct_index + 1) % prompt.choices.len()
        } else {
            prompt.correct_index
        };
        assert_eq!(driver.input(SessionEvent::Answer(choice)), None);
        result = driver.advance_by(450);
    }
    let result = result.unwrap();
    assert_eq!(result, SessionResult::new(9, 45, 60));
    assert_eq!(driver.pending_timers(), 0);

    let mut store = ProgressStore::open(MemoryStore::new());
    let outcome = store.record_challenge(unit, 1, result);
    assert_eq!(
        outcome.stat,
        LevelStat {
            best_score: 9,
            best_time_sec: Some(45),
            stars: 2,
        }
    );
    assert_eq!(outcome.unlocked, 2);
    let track = &store.progress().unit(unit).challenge;
    assert_eq!(track.cleared_levels, 1);
    assert_eq!(track.best_score, 9);
    assert_eq!(track.best_time_sec, Some(45));
}

#[test]
fn arcade_perfect_run_unlocks_speed_and_score_badges() {
    let config = ChallengeConfig::default().with_tick(4000);
    let session = ArcadeSession::with_placer(&config, Box::new(TargetAhead)).unwrap();
    let mut driver = SessionDriver::new(session);
    driver.start();

    // The clock tick at 40 s is registered first, so it fires before the
    // simulation step that collects the tenth target.
    let result = driver.run_until_idle().unwrap();
    assert_eq!(result, SessionResult::new(10, 40, 60));
    assert_eq!(driver.session().outcome(), ArcadeOutcome::Won);
    assert_eq!(driver.now_ms(), 40_000);

    let unit = UnitId::new(2).unwrap();
    let mut store = ProgressStore::open(MemoryStore::new());
    let outcome = store.record_challenge(unit, 2, result);
    assert_eq!(outcome.stat.stars, 3);
    assert!(outcome.new_badges.iter().any(|b| b == PERFECT_10));
    assert!(outcome.new_badges.iter().any(|b| b == SPEEDSTER));
    assert_eq!(store.progress().total_xp, 20);
}

#[test]
fn arcade_timeout_reports_full_budget() {
    let config = ChallengeConfig::default().with_total_time(5).with_tick(100);
    let session = ArcadeSession::with_placer(&config, Box::new(FarCorner)).unwrap();
    let mut driver = SessionDriver::new(session);
    driver.start();

    // Circle a 2x2 square, which a three-cell body can do forever.
    let turns = [Heading::Down, Heading::Left, Heading::Up, Heading::Right];
    let mut result = None;
    for (i, turn) in turns.iter().cycle().take(60).enumerate() {
        driver.input(SessionEvent::Steer(*turn));
        result = driver.advance_to((i as u64 + 1) * 100);
        if result.is_some() {
            break;
        }
    }
    assert_eq!(result, Some(SessionResult::new(0, 5, 5)));
    assert_eq!(driver.session().outcome(), ArcadeOutcome::TimedOut);
    assert_eq!(driver.now_ms(), 5000);

    let unit = UnitId::new(3).unwrap();
    let mut store = ProgressStore::open(MemoryStore::new());
    let outcome = store.record_challenge(unit, 4, SessionResult::new(0, 5, 5));
    assert_eq!(outcome.stat.stars, 0);
    assert_eq!(outcome.unlocked, 1);
    assert!(outcome.new_badges.iter().any(|b| b == SPEEDSTER));
}
