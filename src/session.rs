use crate::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

pub const GAME_DURATION_SECS: u32 = 50;
pub const CORRECT_ANSWER_DELAY_MS: u64 = 500;
pub const INCORRECT_ANSWER_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub game_duration_secs: u32,
    pub correct_delay: Duration,
    pub incorrect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            correct_delay: Duration::from_millis(CORRECT_ANSWER_DELAY_MS),
            incorrect_delay: Duration::from_millis(INCORRECT_ANSWER_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Start,
    Playing,
    Over,
    Review,
}

/// What the player did with a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Chosen(String),
    Skipped,
}

impl Selection {
    pub fn is_skip(&self) -> bool {
        matches!(self, Selection::Skipped)
    }

    pub fn as_chosen(&self) -> Option<&str> {
        match self {
            Selection::Chosen(answer) => Some(answer),
            Selection::Skipped => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Chosen(answer) => write!(f, "{answer}"),
            Selection::Skipped => write!(f, "Skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    pub prompt: String,
    pub answer: String,
    pub selected: Selection,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    pub current_question: Option<Question>,
    pub score: u32,
    pub questions_asked: u32,
    pub used_prompts: HashSet<String>,
    pub time_remaining: u32,
    pub mistakes: Vec<Mistake>,
    pub pending_answer: Option<Selection>,
}

impl SessionState {
    pub fn new(game_duration_secs: u32) -> Self {
        Self {
            phase: Phase::Start,
            current_question: None,
            score: 0,
            questions_asked: 0,
            used_prompts: HashSet::new(),
            time_remaining: game_duration_secs,
            mistakes: Vec::new(),
            pending_answer: None,
        }
    }

    /// Mistakes where an option was chosen, in the order they happened
    pub fn wrong_answers(&self) -> impl Iterator<Item = &Mistake> {
        self.mistakes.iter().filter(|m| !m.selected.is_skip())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Mistake> {
        self.mistakes.iter().filter(|m| m.selected.is_skip())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(GAME_DURATION_SECS)
    }
}

/// End-of-game figures shown on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub questions_asked: u32,
    pub score: u32,
    pub accuracy: u32,
    pub perfect: bool,
    pub wrong_count: usize,
    pub skipped_count: usize,
}
