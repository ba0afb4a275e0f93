//! Built-in demo content: unit titles and a small shuffled question bank.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use lq_challenge::{Prompt, QuestionSource};
use lq_core::UnitId;

const TITLES: [&str; 6] = ["Greetings", "Classroom", "Family", "Food", "Hobbies", "Travel"];

/// (term, meaning) pairs.
const WORDS: [(&str, &str); 5] = [
    ("hello", "a friendly greeting"),
    ("goodbye", "said when leaving"),
    ("teacher", "a person who teaches a class"),
    ("student", "a person who studies at school"),
    ("school", "a place where children learn"),
];

/// (sentence with a gap, right form).
const BE_VERBS: [(&str, &str); 5] = [
    ("I __ a student.", "am"),
    ("She __ a teacher.", "is"),
    ("They __ friends.", "are"),
    ("He __ my brother.", "is"),
    ("We __ in the library.", "are"),
];

const BE_FORMS: [&str; 4] = ["am", "is", "are", "be"];

const STORY: [&str; 4] = [
    "Tom is new at school.",
    "He meets a teacher and a student.",
    "They show him the library.",
    "They play together at the playground.",
];

/// Display title of a unit.
pub fn unit_title(unit: UnitId) -> &'static str {
    TITLES[usize::from(unit.get() - 1)]
}

/// Mixes vocabulary, grammar and story-order questions, shuffled by its RNG.
#[derive(Debug)]
pub struct DemoBank {
    rng: StdRng,
}

impl DemoBank {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// A prompt whose choices are shuffled, with the correct index tracked.
    fn prompt(&mut self, text: String, correct: &str, mut choices: Vec<&str>) -> Option<Prompt> {
        choices.shuffle(&mut self.rng);
        let correct_index = choices.iter().position(|c| *c == correct)?;
        let choices = choices.into_iter().map(str::to_string).collect();
        Prompt::new(text, choices, correct_index).ok()
    }

    fn vocab(&mut self, count: usize) -> Vec<Prompt> {
        let mut out = Vec::new();
        for (term, meaning) in WORDS.iter().take(count) {
            let mut distractors: Vec<&str> = WORDS
                .iter()
                .map(|(t, _)| *t)
                .filter(|t| t != term)
                .collect();
            distractors.shuffle(&mut self.rng);
            distractors.truncate(3);
            distractors.push(*term);
            let text = format!("Which word means \"{meaning}\"?");
            out.extend(self.prompt(text, term, distractors));
        }
        out
    }

    fn grammar(&mut self, count: usize) -> Vec<Prompt> {
        let mut out = Vec::new();
        for (sentence, form) in BE_VERBS.iter().take(count) {
            out.extend(self.prompt(sentence.to_string(), form, BE_FORMS.to_vec()));
        }
        out
    }

    fn story(&mut self, count: usize) -> Vec<Prompt> {
        let mut out = Vec::new();
        for (k, sentence) in STORY.iter().enumerate().take(count) {
            let text = format!("Which is sentence {} of the story?", k + 1);
            out.extend(self.prompt(text, sentence, STORY.to_vec()));
        }
        out
    }
}

impl QuestionSource for DemoBank {
    fn questions(&mut self, _unit: UnitId, count: usize) -> Vec<Prompt> {
        let mut all = self.vocab(count.min(5));
        all.extend(self.grammar(count.min(3)));
        all.extend(self.story(count.min(2)));
        all.shuffle(&mut self.rng);
        all.truncate(count);
        all
    }
}
