//! Application configuration management.
//!
//! Holds the default snapshot path, the leaderboard size and an optional
//! log directory. Configuration is stored at `~/.config/rollcall/config.json`;
//! `ROLLCALL_DATA` overrides the snapshot path.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides `data_file`
pub const DATA_ENV: &str = "ROLLCALL_DATA";

/// Environment variable that pins the report clock
pub const NOW_ENV: &str = "ROLLCALL_NOW";

/// Leaderboard size when neither flag nor config sets one
const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub data_file: Option<PathBuf>,
    pub leaderboard_limit: Option<usize>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Snapshot path: explicit flag, then environment, then config
    pub fn data_file(&self, flag: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.data_file.clone())
    }

    pub fn leaderboard_limit(&self, flag: Option<usize>) -> usize {
        flag.or(self.leaderboard_limit)
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
    }
}
