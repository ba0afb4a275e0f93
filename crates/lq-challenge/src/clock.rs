//! Countdown clock for one session.

/// Counts down whole seconds while running.
///
/// Each [`tick`](SessionClock::tick) removes one second, never going below
/// zero. The tick that reaches zero is the only one that reports expiry.
#[derive(Debug, Clone)]
pub struct SessionClock {
    total_secs: u32,
    remaining: u32,
    running: bool,
}

impl SessionClock {
    /// A stopped clock holding `total_secs`.
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining: total_secs,
            running: false,
        }
    }

    /// Start counting from the full budget.
    pub fn start(&mut self) {
        self.remaining = self.total_secs;
        self.running = true;
    }

    /// Stop counting; the remaining time is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Change the budget and reset the remaining time to it.
    pub fn set_total(&mut self, total_secs: u32) {
        self.total_secs = total_secs;
        self.remaining = total_secs;
    }

    /// Count down one second. Returns `true` only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds used so far.
    pub fn elapsed(&self) -> u32 {
        self.total_secs - self.remaining
    }

    /// The full budget.
    pub fn total(&self) -> u32 {
        self.total_secs
    }

    /// Whether the clock is counting.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the clock has reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_does_not_count() {
        let mut clock = SessionClock::new(3);
        assert!(!clock.tick());
        assert_eq!(clock.remaining(), 3);
    }

    #[test]
    fn counts_down_and_expires_once() {
        let mut clock = SessionClock::new(3);
        clock.start();
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.remaining(), 1);
        assert!(clock.tick());
        assert!(clock.is_expired());
        assert!(!clock.tick());
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.elapsed(), 3);
    }

    #[test]
    fn restart_resets_remaining() {
        let mut clock = SessionClock::new(5);
        clock.start();
        clock.tick();
        clock.tick();
        clock.stop();
        assert_eq!(clock.remaining(), 3);
        clock.start();
        assert_eq!(clock.remaining(), 5);
    }

    #[test]
    fn changing_total_resets() {
        let mut clock = SessionClock::new(5);
        clock.start();
        clock.tick();
        clock.set_total(10);
        assert_eq!(clock.remaining(), 10);
        assert_eq!(clock.elapsed(), 0);
    }
}
