//! Real-time arcade run: a growing agent chasing targets on a square grid.
//!
//! Two timers drive the session: the one-second clock and a faster
//! simulation step. Each step consumes the buffered heading, moves the
//! head one cell, and either grows (target eaten), slides, or dies (wall
//! or own body).

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use lq_core::SessionResult;

use crate::clock::SessionClock;
use crate::config::ChallengeConfig;
use crate::error::ChallengeResult;
use crate::event::{Heading, SessionEvent};
use crate::session::ChallengeSession;
use crate::timer::TimerQueue;

/// Length of the agent at the start of a run.
pub const START_LENGTH: usize = 3;

/// A grid cell. Column `x`, row `y`, both from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// A cell at column `x`, row `y`.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `heading`.
    pub fn step(self, heading: Heading) -> Cell {
        let (dx, dy) = heading.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// Whether the cell lies on a `size` x `size` grid.
    pub fn within(self, size: u32) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// How an arcade run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeOutcome {
    /// Created but not started.
    NotStarted,
    /// In play.
    Running,
    /// Reached the target score.
    Won,
    /// Hit a wall or itself.
    Lost,
    /// The clock ran out.
    TimedOut,
}

impl ArcadeOutcome {
    /// Whether the run is over.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ArcadeOutcome::Won | ArcadeOutcome::Lost | ArcadeOutcome::TimedOut
        )
    }
}

/// Chooses where the next target appears.
pub trait TargetPlacer: std::fmt::Debug {
    /// A free cell on a `size` x `size` grid not in `body`, or `None` if the grid is full.
    fn place(&mut self, size: u32, body: &VecDeque<Cell>) -> Option<Cell>;
}

/// Places targets uniformly at random among free cells.
#[derive(Debug, Clone)]
pub struct RandomPlacer {
    rng: StdRng,
}

impl RandomPlacer {
    /// A placer drawing from `rng`.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl TargetPlacer for RandomPlacer {
    fn place(&mut self, size: u32, body: &VecDeque<Cell>) -> Option<Cell> {
        let size = size as i32;
        let free: Vec<Cell> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(x, y)))
            .filter(|c| !body.contains(c))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }
}

/// An arcade run.
#[derive(Debug)]
pub struct ArcadeSession {
    grid_size: u32,
    body: VecDeque<Cell>,
    heading: Heading,
    pending: Heading,
    target: Option<Cell>,
    score: u32,
    target_score: u32,
    outcome: ArcadeOutcome,
    clock: SessionClock,
    tick_ms: u64,
    steps: u64,
    placer: Box<dyn TargetPlacer>,
}

impl ArcadeSession {
    /// A run with randomly placed targets drawn from [`ChallengeConfig::rng`].
    pub fn new(config: &ChallengeConfig) -> ChallengeResult<Self> {
        Self::with_placer(config, Box::new(RandomPlacer::new(config.rng())))
    }

    /// A run using `placer` for targets.
    pub fn with_placer(
        config: &ChallengeConfig,
        mut placer: Box<dyn TargetPlacer>,
    ) -> ChallengeResult<Self> {
        config.validate()?;
        let size = config.grid_size as i32;
        let head = Cell::new(size / 4, size / 2);
        let body: VecDeque<Cell> = (0..START_LENGTH as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        let target = placer.place(config.grid_size, &body);
        Ok(Self {
            grid_size: config.grid_size,
            body,
            heading: Heading::Right,
            pending: Heading::Right,
            target,
            score: 0,
            target_score: config.target_score,
            outcome: ArcadeOutcome::NotStarted,
            clock: SessionClock::new(config.total_time_secs),
            tick_ms: config.tick_ms,
            steps: 0,
            placer,
        })
    }

    /// Request a turn, applied on the next step. A direct reversal of the
    /// current heading is refused and leaves the request unchanged.
    ///
    /// Returns whether the request was accepted.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if self.outcome != ArcadeOutcome::Running || heading == self.heading.opposite() {
            return false;
        }
        self.pending = heading;
        true
    }

    /// Cells occupied by the agent, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// The agent's head.
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// The current target.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Heading applied on the last step.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Heading the next step will use.
    pub fn pending_heading(&self) -> Heading {
        self.pending
    }

    /// Targets collected.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Targets needed to win.
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// How the run stands.
    pub fn outcome(&self) -> ArcadeOutcome {
        self.outcome
    }

    /// Grid side length.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Simulation steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn step(&mut self) -> Option<SessionResult> {
        self.heading = self.pending;
        self.steps += 1;
        let next = self.head().step(self.heading);

        if !next.within(self.grid_size) || self.body.contains(&next) {
            debug!(x = next.x, y = next.y, score = self.score, "collision");
            return Some(self.finish(ArcadeOutcome::Lost));
        }

        self.body.push_front(next);
        if self.target == Some(next) {
            self.score += 1;
            debug!(score = self.score, "target collected");
            if self.score >= self.target_score {
                return Some(self.finish(ArcadeOutcome::Won));
            }
            self.target = self.placer.place(self.grid_size, &self.body);
            if self.target.is_none() {
                return Some(self.finish(ArcadeOutcome::Won));
            }
        } else {
            self.body.pop_back();
        }
        None
    }

    fn finish(&mut self, outcome: ArcadeOutcome) -> SessionResult {
        self.outcome = outcome;
        self.clock.stop();
        let used = match outcome {
            ArcadeOutcome::TimedOut => self.clock.total(),
            _ => self.clock.elapsed(),
        };
        SessionResult::new(self.score, used, self.clock.total())
    }
}

impl ChallengeSession for ArcadeSession {
    fn name(&self) -> &str {
        "arcade"
    }

    fn start(&mut self, timers: &mut TimerQueue) {
        if self.outcome != ArcadeOutcome::NotStarted {
            return;
        }
        self.clock.start();
        timers.every(1000, SessionEvent::ClockTick);
        timers.every(self.tick_ms, SessionEvent::SimTick);
        self.outcome = ArcadeOutcome::Running;
    }

    fn handle(&mut self, event: SessionEvent, _timers: &mut TimerQueue) -> Option<SessionResult> {
        if self.outcome != ArcadeOutcome::Running {
            return None;
        }
        match event {
            SessionEvent::Steer(heading) => {
                self.steer(heading);
                None
            }
            SessionEvent::SimTick => self.step(),
            SessionEvent::ClockTick => {
                if self.clock.tick() {
                    return Some(self.finish(ArcadeOutcome::TimedOut));
                }
                None
            }
            _ => None,
        }
    }

    fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    fn remaining_secs(&self) -> u32 {
        self.clock.remaining()
    }
}
