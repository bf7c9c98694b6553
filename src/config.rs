use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::DEFAULT_NORMAL_MODE_SECS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds spent in normal mode before the game turns chaotic. Chaotic
    /// stretches last twice this long.
    pub normal_mode_secs: u64,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normal_mode_secs: DEFAULT_NORMAL_MODE_SECS,
            seed: None,
        }
    }
}

impl Config {
    /// Loads the config file, falling back to defaults when it is missing
    /// or unparseable. Configuration trouble never stops the game.
    #[must_use]
    pub fn load() -> Self {
        let path = match config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Self::default(),
        };
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Using default config: {err:#}");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    #[must_use]
    pub fn normal_mode_ms(&self) -> u64 {
        self.normal_mode_secs * 1000
    }
}

/// Platform-specific configuration directory for the game.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    let home_dir = dirs::home_dir()?;

    #[cfg(target_os = "linux")]
    let config_dir = home_dir.join(".config").join("zatris");
    #[cfg(target_os = "macos")]
    let config_dir = home_dir
        .join("Library")
        .join("Application Support")
        .join("zatris");
    #[cfg(target_os = "windows")]
    let config_dir = home_dir.join("AppData").join("Roaming").join("zatris");
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let config_dir = home_dir.join(".zatris");

    Some(config_dir)
}
