use crate::error::GameError;
use crate::word_bank::WordBank;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick `count` distinct wrong answers for `correct` from the bank's answer universe.
///
/// The candidates are fully shuffled before taking the first `count`, so every
/// answer has the same chance of appearing regardless of its position in the bank.
pub fn pick_distractors<R: Rng + ?Sized>(
    correct: &str,
    count: usize,
    pool: &WordBank,
    rng: &mut R,
) -> Result<Vec<String>, GameError> {
    let mut candidates: Vec<&str> = pool
        .answers()
        .into_iter()
        .filter(|answer| *answer != correct)
        .collect();

    if candidates.len() < count {
        return Err(GameError::InsufficientPool {
            needed: count,
            available: candidates.len(),
        });
    }

    candidates.shuffle(rng);
    Ok(candidates
        .into_iter()
        .take(count)
        .map(str::to_string)
        .collect())
}
