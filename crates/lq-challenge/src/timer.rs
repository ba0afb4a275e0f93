//! Virtual-time timer queue.
//!
//! Sessions never sleep. They register timers here and a host advances
//! virtual time, receiving each due event in order. Timers due at the same
//! instant fire in registration order.

use crate::event::SessionEvent;

/// Handle to a registered timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    interval_ms: Option<u64>,
    event: SessionEvent,
}

/// Pending timers plus the current virtual time.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `event` every `interval_ms`, first at `now + interval_ms`.
    pub fn every(&mut self, interval_ms: u64, event: SessionEvent) -> TimerId {
        let interval_ms = interval_ms.max(1);
        self.push(self.now_ms + interval_ms, Some(interval_ms), event)
    }

    /// Fire `event` once at `now + delay_ms`.
    pub fn after(&mut self, delay_ms: u64, event: SessionEvent) -> TimerId {
        self.push(self.now_ms + delay_ms, None, event)
    }

    /// Remove one timer. Unknown ids are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// Remove every timer.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// When the next timer is due.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are rescheduled.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<SessionEvent> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(i, _)| i)?;

        let due = self.timers[idx].due_ms;
        self.now_ms = self.now_ms.max(due);
        let event = self.timers[idx].event;
        match self.timers[idx].interval_ms {
            Some(interval) => self.timers[idx].due_ms += interval,
            None => {
                self.timers.remove(idx);
            }
        }
        Some(event)
    }

    /// Move the clock forward to `ms` without firing anything.
    pub fn set_now(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    fn push(&mut self, due_ms: u64, interval_ms: Option<u64>, event: SessionEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms,
            interval_ms,
            event,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain(queue: &mut TimerQueue, until: u64) -> Vec<(u64, SessionEvent)> {
        let mut out = Vec::new();
        while let Some(event) = queue.pop_due(until) {
            out.push((queue.now_ms(), event));
        }
        out
    }

    #[test]
    fn repeating_timer_fires_each_interval() {
        let mut q = TimerQueue::new();
        q.every(1000, SessionEvent::ClockTick);
        let fired = drain(&mut q, 3500);
        assert_eq!(
            fired,
            vec![
                (1000, SessionEvent::ClockTick),
                (2000, SessionEvent::ClockTick),
                (3000, SessionEvent::ClockTick),
            ]
        );
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(4000));
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        q.after(450, SessionEvent::RevealElapsed);
        assert_eq!(drain(&mut q, 10_000).len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn interleaves_by_due_time() {
        let mut q = TimerQueue::new();
        q.every(1000, SessionEvent::ClockTick);
        q.every(400, SessionEvent::SimTick);
        let kinds: Vec<_> = drain(&mut q, 2000).into_iter().map(|(t, _)| t).collect();
        assert_eq!(kinds, vec![400, 800, 1000, 1200, 1600, 2000, 2000]);
    }

    #[test]
    fn ties_fire_in_registration_order() {
        let mut q = TimerQueue::new();
        q.every(1000, SessionEvent::ClockTick);
        q.every(500, SessionEvent::SimTick);
        let at_2000: Vec<_> = drain(&mut q, 2000)
            .into_iter()
            .filter(|(t, _)| *t == 2000)
            .map(|(_, e)| e)
            .collect();
        assert_eq!(at_2000, vec![SessionEvent::ClockTick, SessionEvent::SimTick]);
    }

    #[test]
    fn cancel_removes_timer() {
        let mut q = TimerQueue::new();
        let id = q.every(100, SessionEvent::SimTick);
        q.after(50, SessionEvent::RevealElapsed);
        q.cancel(id);
        assert_eq!(drain(&mut q, 1000), vec![(50, SessionEvent::RevealElapsed)]);
    }

    #[test]
    fn timers_schedule_from_current_time() {
        let mut q = TimerQueue::new();
        q.set_now(700);
        q.after(450, SessionEvent::RevealElapsed);
        assert_eq!(q.next_due(), Some(1150));
    }

    proptest! {
        #[test]
        fn fires_in_due_order(
            intervals in proptest::collection::vec(1u64..2000, 1..6),
            until in 0u64..20_000,
        ) {
            let mut q = TimerQueue::new();
            for interval in &intervals {
                q.every(*interval, SessionEvent::SimTick);
            }
            let times: Vec<u64> = drain(&mut q, until).into_iter().map(|(t, _)| t).collect();
            prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
            let expected: u64 = intervals.iter().map(|i| until / i).sum();
            prop_assert_eq!(times.len() as u64, expected);
        }
    }
}
