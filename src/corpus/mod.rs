use crate::error::GameError;
use crate::word_bank::{WordBank, WordPair};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static CORPUS_DIR: Dir = include_dir!("src/corpus");

pub const DEFAULT_CORPUS: &str = "english_chinese";

/// A named list of translation pairs as stored on disk
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Corpus {
    pub name: String,
    pub pairs: Vec<WordPair>,
}

impl Corpus {
    /// Load one of the corpora compiled into the binary.
    pub fn embedded(name: &str) -> Result<Self, GameError> {
        let file = CORPUS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| GameError::CorpusNotFound(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| GameError::CorpusNotFound(name.to_string()))?;

        Self::from_json(contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let corpus: Corpus = serde_json::from_str(json)?;
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> Result<(), GameError> {
        match self
            .pairs
            .iter()
            .position(|p| p.prompt.trim().is_empty() || p.answer.trim().is_empty())
        {
            Some(index) => Err(GameError::InvalidEntry { index }),
            None => Ok(()),
        }
    }

    pub fn into_bank(self) -> Result<WordBank, GameError> {
        tracing::debug!(name = %self.name, pairs = self.pairs.len(), "loading corpus");
        WordBank::new(self.pairs)
    }
}

/// Names of the corpora compiled into the binary
pub fn embedded_names() -> Vec<String> {
    let mut names: Vec<String> = CORPUS_DIR
        .files()
        .filter_map(|f| {
            let path = f.path();
            match path.extension().and_then(|e| e.to_str()) {
                Some("json") => path.file_stem().and_then(|s| s.to_str()).map(String::from),
                _ => None,
            }
        })
        .collect();
    names.sort();
    names
}
