use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::typing_policy::{TypingPolicy, MAX_OVERFLOW};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_bank: String,
    /// `None` races the whole bank
    pub number_of_words: Option<usize>,
    pub max_overflow: usize,
    pub allowed_keys: Vec<Key>,
    pub record_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_bank: "common".to_string(),
            number_of_words: None,
            max_overflow: MAX_OVERFLOW,
            allowed_keys: vec![Key::Tab],
            record_history: true,
        }
    }
}

impl Config {
    pub fn typing_policy(&self) -> TypingPolicy {
        TypingPolicy::new(self.max_overflow, self.allowed_keys.clone())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
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
    /// Missing files give defaults silently; unreadable ones with a warning
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(
                    "ignoring malformed config {}: {e}",
                    self.path.display()
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("creating config dir", e))?;
        }
        let data =
            serde_json::to_vec_pretty(cfg).map_err(|e| Error::json("serializing config", e))?;
        fs::write(&self.path, data).map_err(|e| Error::io("writing config", e))
    }
}
