use crate::error::GameError;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An English prompt and its Chinese translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub prompt: String,
    pub answer: String,
}

impl WordPair {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable, ordered collection of translation pairs.
#[derive(Debug, Clone)]
pub struct WordBank {
    pairs: Vec<WordPair>,
}

impl WordBank {
    pub fn new(pairs: Vec<WordPair>) -> Result<Self, GameError> {
        if pairs.is_empty() {
            return Err(GameError::EmptyBank);
        }
        Ok(Self { pairs })
    }

    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn all(&self) -> &[WordPair] {
        &self.pairs
    }

    pub fn contains_prompt(&self, prompt: &str) -> bool {
        self.pairs.iter().any(|p| p.prompt == prompt)
    }

    /// Distinct answers in bank order. Two prompts may share a translation,
    /// so this can be shorter than the bank.
    pub fn answers(&self) -> Vec<&str> {
        self.pairs.iter().map(|p| p.answer.as_str()).unique().collect()
    }

    /// Uniformly pick a pair whose prompt is not in `excluded`.
    ///
    /// Returns `None` once every prompt is excluded; resetting the exclusion
    /// set is left to the caller.
    pub fn sample_excluding<R: Rng + ?Sized>(
        &self,
        excluded: &HashSet<String>,
        rng: &mut R,
    ) -> Option<&WordPair> {
        let available: Vec<&WordPair> = self
            .pairs
            .iter()
            .filter(|p| !excluded.contains(&p.prompt))
            .collect();

        available.choose(rng).copied()
    }
}
