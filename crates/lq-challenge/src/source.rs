//! Where quiz prompts come from.

use lq_core::UnitId;

use crate::quiz::Prompt;

/// Supplies prompts for a unit's quiz runs.
pub trait QuestionSource {
    /// Up to `count` prompts for `unit`. Every prompt must have at least one
    /// choice and a correct index inside its choices.
    fn questions(&mut self, unit: UnitId, count: usize) -> Vec<Prompt>;
}

/// A fixed prompt list, served the same for every unit.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    prompts: Vec<Prompt>,
}

impl FixedSource {
    /// Serve `prompts` in order.
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self { prompts }
    }
}

impl QuestionSource for FixedSource {
    fn questions(&mut self, _unit: UnitId, count: usize) -> Vec<Prompt> {
        self.prompts.iter().take(count).cloned().collect()
    }
}
