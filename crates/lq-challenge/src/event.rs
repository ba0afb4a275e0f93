//! Events delivered to a running session.

use std::fmt;

/// Direction of travel on the arcade grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Heading {
    /// Column and row offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// The reverse direction.
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        };
        f.write_str(name)
    }
}

/// Something that happened to a session: a timer firing or player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second of the session clock passed.
    ClockTick,
    /// The arcade simulation should advance one step.
    SimTick,
    /// A quiz answer has been shown long enough.
    RevealElapsed,
    /// The player picked a quiz choice.
    Answer(usize),
    /// The player asked the arcade agent to turn.
    Steer(Heading),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for h in [Heading::Up, Heading::Down, Heading::Left, Heading::Right] {
            assert_eq!(h.opposite().opposite(), h);
            let (dx, dy) = h.delta();
            let (ox, oy) = h.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
