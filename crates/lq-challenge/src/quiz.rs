//! Multiple-choice quiz run.
//!
//! ```text
//! NotStarted -> AwaitingAnswer -> Revealing -> AwaitingAnswer ... -> Finished
//!                      \______________\_______ clock expiry _______/
//! ```

use tracing::debug;

use lq_core::SessionResult;

use crate::clock::SessionClock;
use crate::config::ChallengeConfig;
use crate::error::{ChallengeError, ChallengeResult};
use crate::event::SessionEvent;
use crate::session::ChallengeSession;
use crate::timer::TimerQueue;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Question text.
    pub text: String,
    /// Answer options, in display order.
    pub choices: Vec<String>,
    /// Index of the right option in `choices`.
    pub correct_index: usize,
}

impl Prompt {
    /// Build a prompt, checking it has choices and a valid correct index.
    pub fn new(
        text: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
    ) -> ChallengeResult<Self> {
        let prompt = Self {
            text: text.into(),
            choices,
            correct_index,
        };
        prompt.validate()?;
        Ok(prompt)
    }

    /// Check the prompt is answerable.
    pub fn validate(&self) -> ChallengeResult<()> {
        if self.choices.is_empty() {
            return Err(ChallengeError::EmptyChoices(self.text.clone()));
        }
        if self.correct_index >= self.choices.len() {
            return Err(ChallengeError::InvalidCorrectIndex {
                index: self.correct_index,
                len: self.choices.len(),
            });
        }
        Ok(())
    }

    /// Whether `choice` is the right answer.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// Where a quiz run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Created but not started.
    NotStarted,
    /// Waiting for the player to pick a choice.
    AwaitingAnswer,
    /// Showing whether the last pick was right; input is ignored.
    Revealing {
        /// The picked choice.
        chosen: usize,
        /// Whether it was right.
        correct: bool,
    },
    /// Ended.
    Finished,
}

/// A timed run through a fixed list of prompts.
#[derive(Debug, Clone)]
pub struct QuizSession {
    prompts: Vec<Prompt>,
    index: usize,
    score: u32,
    answers: Vec<bool>,
    state: QuizState,
    clock: SessionClock,
    reveal_delay_ms: u64,
}

impl QuizSession {
    /// A quiz over `prompts`. Every prompt must be answerable and there must be at least one.
    pub fn new(prompts: Vec<Prompt>, config: &ChallengeConfig) -> ChallengeResult<Self> {
        config.validate()?;
        if prompts.is_empty() {
            return Err(ChallengeError::NoPrompts);
        }
        for prompt in &prompts {
            prompt.validate()?;
        }
        Ok(Self {
            prompts,
            index: 0,
            score: 0,
            answers: Vec::new(),
            state: QuizState::NotStarted,
            clock: SessionClock::new(config.total_time_secs),
            reveal_delay_ms: config.reveal_delay_ms,
        })
    }

    /// Current state.
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// The prompt being asked or revealed.
    pub fn current(&self) -> Option<&Prompt> {
        match self.state {
            QuizState::AwaitingAnswer | QuizState::Revealing { .. } => self.prompts.get(self.index),
            _ => None,
        }
    }

    /// Zero-based position of the current prompt.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always false; a quiz has at least one prompt.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Points so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Correctness of each answer given so far.
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    fn answer(&mut self, choice: usize, timers: &mut TimerQueue) {
        let Some(prompt) = self.prompts.get(self.index) else {
            return;
        };
        if choice >= prompt.choices.len() {
            debug!(choice, "ignoring out-of-range answer");
            return;
        }
        let correct = prompt.is_correct(choice);
        if correct {
            self.score += 1;
        }
        self.answers.push(correct);
        self.state = QuizState::Revealing { chosen: choice, correct };
        timers.after(self.reveal_delay_ms, SessionEvent::RevealElapsed);
        debug!(question = self.index + 1, correct, score = self.score, "answered");
    }

    fn finish(&mut self, time_used: u32) -> SessionResult {
        self.state = QuizState::Finished;
        self.clock.stop();
        SessionResult::new(self.score, time_used, self.clock.total())
    }
}

impl ChallengeSession for QuizSession {
    fn name(&self) -> &str {
        "quiz"
    }

    fn start(&mut self, timers: &mut TimerQueue) {
        if self.state != QuizState::NotStarted {
            return;
        }
        self.clock.start();
        timers.every(1000, SessionEvent::ClockTick);
        self.state = QuizState::AwaitingAnswer;
    }

    fn handle(&mut self, event: SessionEvent, timers: &mut TimerQueue) -> Option<SessionResult> {
        if matches!(self.state, QuizState::NotStarted | QuizState::Finished) {
            return None;
        }
        match event {
            SessionEvent::Answer(choice) if self.state == QuizState::AwaitingAnswer => {
                self.answer(choice, timers);
                None
            }
            SessionEvent::RevealElapsed => {
                if !matches!(self.state, QuizState::Revealing { .. }) {
                    return None;
                }
                if self.index + 1 >= self.prompts.len() {
                    let used = self.clock.elapsed();
                    return Some(self.finish(used));
                }
                self.index += 1;
                self.state = QuizState::AwaitingAnswer;
                None
            }
            SessionEvent::ClockTick => {
                if self.clock.tick() {
                    // Out of time: report the full budget, with every point
                    // scored so far, including one still being revealed.
                    let total = self.clock.total();
                    return Some(self.finish(total));
                }
                None
            }
            _ => None,
        }
    }

    fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    fn remaining_secs(&self) -> u32 {
        self.clock.remaining()
    }
}
