use std::io;

/// Errors raised while loading a corpus or configuring a game.
///
/// All of these describe a malformed corpus rather than something that can go wrong during
/// play, so callers are expected to surface them and stop.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("word bank is empty")]
    EmptyBank,

    #[error("not enough distinct answers: need {needed}, have {available}")]
    InsufficientPool { needed: usize, available: usize },

    #[error("corpus entry {index} has a blank prompt or answer")]
    InvalidEntry { index: usize },

    #[error("corpus not found: {0}")]
    CorpusNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
