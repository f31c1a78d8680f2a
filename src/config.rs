use crate::session::{
    SessionConfig, CORRECT_ANSWER_DELAY_MS, GAME_DURATION_SECS, INCORRECT_ANSWER_DELAY_MS,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub game_duration_secs: u32,
    pub correct_delay_ms: u64,
    pub incorrect_delay_ms: u64,
    pub corpus_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            correct_delay_ms: CORRECT_ANSWER_DELAY_MS,
            incorrect_delay_ms: INCORRECT_ANSWER_DELAY_MS,
            corpus_path: None,
        }
    }
}

/// Stored values are clamped: a game lasts at least one second and the
/// wrong-answer pause is never shorter than the correct-answer one.
impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        let game_duration_secs = cfg.game_duration_secs.max(1);
        if game_duration_secs != cfg.game_duration_secs {
            tracing::warn!("game duration of 0s raised to 1s");
        }

        let incorrect_delay_ms = cfg.incorrect_delay_ms.max(cfg.correct_delay_ms);
        if incorrect_delay_ms != cfg.incorrect_delay_ms {
            tracing::warn!(
                correct_delay_ms = cfg.correct_delay_ms,
                "incorrect delay of {}ms raised to match the correct delay",
                cfg.incorrect_delay_ms
            );
        }

        Self {
            game_duration_secs,
            correct_delay: Duration::from_millis(cfg.correct_delay_ms),
            incorrect_delay: Duration::from_millis(incorrect_delay_ms),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "wordrace") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordrace_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!(path = %self.path.display(), "ignoring bad config: {e}"),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            game_duration_secs: 90,
            correct_delay_ms: 300,
            incorrect_delay_ms: 3000,
            corpus_path: Some(PathBuf::from("/tmp/words.json")),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_malformed_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{ nope").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "game_duration_secs": 30 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.game_duration_secs, 30);
        assert_eq!(cfg.incorrect_delay_ms, INCORRECT_ANSWER_DELAY_MS);
    }

    #[test]
    fn converts_to_session_config() {
        let session = SessionConfig::from(&Config::default());
        assert_eq!(session, SessionConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = Config {
            game_duration_secs: 0,
            correct_delay_ms: 3000,
            incorrect_delay_ms: 100,
            corpus_path: None,
        };
        let session = SessionConfig::from(&cfg);

        assert_eq!(session.game_duration_secs, 1);
        assert_eq!(session.correct_delay, Duration::from_millis(3000));
        assert_eq!(session.incorrect_delay, Duration::from_millis(3000));
    }

    #[test]
    fn stored_zero_duration_still_gives_a_playable_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "game_duration_secs": 0 }"#).unwrap();

        let session = SessionConfig::from(&FileConfigStore::with_path(&path).load());
        assert_eq!(session.game_duration_secs, 1);
        assert!(session.incorrect_delay >= session.correct_delay);
    }
}
