use crate::distractor::pick_distractors;
use crate::error::GameError;
use crate::word_bank::{WordBank, WordPair};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Number of options shown per question, the correct answer included
pub const OPTION_COUNT: usize = 4;

/// A prompt together with its shuffled answer options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub word: WordPair,
    pub options: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.word.answer
    }

    /// Position of the correct answer within `options`
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.word.answer)
    }
}

/// Builds questions without repeating a prompt until the whole bank has been shown.
pub struct QuestionFactory;

impl QuestionFactory {
    /// Draw the next question, returning it with the updated set of used prompts.
    ///
    /// When `used_prompts` already covers the bank the set is cleared before the
    /// draw, which starts a new cycle and may repeat the last prompt.
    pub fn next<R: Rng + ?Sized>(
        used_prompts: &HashSet<String>,
        bank: &WordBank,
        rng: &mut R,
    ) -> Result<(Question, HashSet<String>), GameError> {
        let mut used = used_prompts.clone();

        let word = match bank.sample_excluding(&used, rng) {
            Some(word) => word.clone(),
            None => {
                tracing::debug!(size = bank.size(), "word bank exhausted, starting new cycle");
                used.clear();
                bank.sample_excluding(&used, rng)
                    .ok_or(GameError::EmptyBank)?
                    .clone()
            }
        };

        let mut options = pick_distractors(&word.answer, OPTION_COUNT - 1, bank, rng)?;
        options.push(word.answer.clone());
        options.shuffle(rng);

        used.insert(word.prompt.clone());
        Ok((Question { word, options }, used))
    }
}
