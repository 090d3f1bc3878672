//! High score persistence
//!
//! One integer survives between runs. A missing or unreadable record
//! means "no high score yet" and loads as 0.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::persistence::{self, StoreError};

/// Storage seam for the best score
pub trait HighScoreStore {
    /// Stored best, 0 if none
    fn load(&self) -> u32;
    /// Persist a new best; failures are logged, never fatal
    fn save(&mut self, score: u32);
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// JSON file in the user's data directory
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: Option<PathBuf>,
}

impl FileHighScoreStore {
    const FILE_NAME: &'static str = "highscore.json";

    /// Store at the default per-user location
    pub fn new() -> Self {
        match persistence::data_file(Self::FILE_NAME) {
            Ok(path) => Self { path: Some(path) },
            Err(e) => {
                log::warn!("High scores will not persist: {}", e);
                Self { path: None }
            }
        }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn try_load(&self) -> Result<u32, StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::NoDataDir)?;
        let record: Option<HighScoreRecord> = persistence::read_json(path)?;
        Ok(record.map(|r| r.high_score).unwrap_or(0))
    }

    fn try_save(&self, score: u32) -> Result<(), StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::NoDataDir)?;
        persistence::write_json(path, &HighScoreRecord { high_score: score })
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Failed to load high score, starting at 0: {}", e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        match self.try_save(score) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}

/// In-memory store for headless runs and tests.
///
/// Clones share the same cell so a test can keep a handle and inspect
/// what the game saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    score: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.score.set(score);
        store
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.score.get()
    }

    fn save(&mut self, score: u32) {
        self.score.set(score);
        self.saves.set(self.saves.get() + 1);
    }
}
