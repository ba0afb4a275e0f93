//! The session contract and the driver that runs sessions.
//!
//! A session is a single-threaded state machine. Timers and player input
//! reach it one event at a time through a [`SessionDriver`]; the first
//! event that ends the session cancels every timer, and the result is
//! reported exactly once.

use tracing::{debug, info};

use lq_core::SessionResult;

use crate::event::SessionEvent;
use crate::timer::TimerQueue;

/// A timed play-through that ends with one [`SessionResult`].
pub trait ChallengeSession {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Begin the session, registering its timers.
    fn start(&mut self, timers: &mut TimerQueue);

    /// Process one event. Returns the result on the event that ends the session.
    fn handle(&mut self, event: SessionEvent, timers: &mut TimerQueue) -> Option<SessionResult>;

    /// Whether the session has reached a terminal state.
    fn is_finished(&self) -> bool;

    /// Seconds left on the session clock.
    fn remaining_secs(&self) -> u32;
}

/// Lifecycle of a driven session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not started yet.
    Idle,
    /// Accepting events.
    Running,
    /// Ended with a result.
    Finished,
    /// Torn down by the host without a result.
    Abandoned,
}

/// Owns a session and its timers and feeds it events in order.
#[derive(Debug)]
pub struct SessionDriver<S: ChallengeSession> {
    session: S,
    timers: TimerQueue,
    state: DriverState,
    result: Option<SessionResult>,
}

impl<S: ChallengeSession> SessionDriver<S> {
    /// Wrap a session that has not started.
    pub fn new(session: S) -> Self {
        Self {
            session,
            timers: TimerQueue::new(),
            state: DriverState::Idle,
            result: None,
        }
    }

    /// Start the session at virtual time zero.
    pub fn start(&mut self) {
        if self.state != DriverState::Idle {
            return;
        }
        self.session.start(&mut self.timers);
        self.state = DriverState::Running;
        debug!(session = self.session.name(), "session started");
    }

    /// Fire every timer due up to `ms`, in order. Returns the result if the
    /// session ended during this call.
    pub fn advance_to(&mut self, ms: u64) -> Option<SessionResult> {
        while self.state == DriverState::Running {
            let Some(event) = self.timers.pop_due(ms) else {
                break;
            };
            if let Some(result) = self.deliver(event) {
                return Some(result);
            }
        }
        self.timers.set_now(ms);
        None
    }

    /// Advance by `ms` from the current time.
    pub fn advance_by(&mut self, ms: u64) -> Option<SessionResult> {
        let target = self.timers.now_ms().saturating_add(ms);
        self.advance_to(target)
    }

    /// Deliver player input at the current time.
    pub fn input(&mut self, event: SessionEvent) -> Option<SessionResult> {
        self.deliver(event)
    }

    /// Run timers until the session ends or nothing is pending.
    pub fn run_until_idle(&mut self) -> Option<SessionResult> {
        while self.state == DriverState::Running {
            let event = self.timers.pop_due(u64::MAX)?;
            if let Some(result) = self.deliver(event) {
                return Some(result);
            }
        }
        None
    }

    /// Tear the session down without a result.
    pub fn abandon(&mut self) {
        if self.state == DriverState::Running || self.state == DriverState::Idle {
            self.timers.cancel_all();
            self.state = DriverState::Abandoned;
            debug!(session = self.session.name(), "session abandoned");
        }
    }

    /// The reported result, once finished.
    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    /// Lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Whether events are being accepted.
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// When the next timer is due.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// The wrapped session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Unwrap the session.
    pub fn into_session(self) -> S {
        self.session
    }

    fn deliver(&mut self, event: SessionEvent) -> Option<SessionResult> {
        if self.state != DriverState::Running {
            return None;
        }
        let result = self.session.handle(event, &mut self.timers)?;
        self.timers.cancel_all();
        self.state = DriverState::Finished;
        self.result = Some(result);
        info!(
            session = self.session.name(),
            score = result.score,
            time_used = result.time_used_secs,
            "session finished"
        );
        Some(result)
    }
}
