//! Learning unit identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, ProgressResult};

/// Number of learning units in the course.
pub const UNIT_COUNT: u8 = 6;

/// Identifier of a learning unit, always in `1..=UNIT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UnitId(u8);

impl UnitId {
    /// Create a unit id, rejecting numbers outside the course.
    pub fn new(id: u8) -> ProgressResult<Self> {
        if (1..=UNIT_COUNT).contains(&id) {
            Ok(Self(id))
        } else {
            Err(ProgressError::InvalidUnit(id))
        }
    }

    /// The unit number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All units in course order.
    pub fn all() -> impl Iterator<Item = UnitId> {
        (1..=UNIT_COUNT).map(UnitId)
    }
}

impl TryFrom<u8> for UnitId {
    type Error = ProgressError;

    fn try_from(id: u8) -> ProgressResult<Self> {
        Self::new(id)
    }
}

impl From<UnitId> for u8 {
    fn from(id: UnitId) -> u8 {
        id.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit {}", self.0)
    }
}
