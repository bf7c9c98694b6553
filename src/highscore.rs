//! High-score persistence: one integer under a single well-known file.
//! Reads fall back to 0 and writes are best-effort; gameplay never stops for
//! a storage problem.

use bevy_ecs::prelude::*;
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FILENAME: &str = "highscore";

/// Where the record lives. Held in the ECS world so tests can point it at a
/// scratch file instead of the player's real one.
#[derive(Resource, Debug)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self {
            path: crate::config::config_dir().map(|dir| dir.join(FILENAME)),
        }
    }
}

impl HighScoreStore {
    /// Store backed by a specific file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store with no backing file: loads return 0 and saves do nothing.
    #[must_use]
    pub fn detached() -> Self {
        Self { path: None }
    }

    #[must_use]
    pub fn load(&self) -> i64 {
        self.path.as_deref().map_or(0, load_from_path)
    }

    /// Persists the high score, swallowing any failure.
    pub fn save(&self, score: i64) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = save_to_path(path, score) {
            warn!("Could not persist high score: {err}");
        }
    }
}

/// Reads a persisted high score; 0 on a missing, unreadable, or corrupt
/// file.
#[must_use]
pub fn load_from_path(path: &Path) -> i64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.trim().parse().ok())
        .unwrap_or(0)
}

pub fn save_to_path(path: &Path, score: i64) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{score}\n"))
}
