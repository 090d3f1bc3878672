//! JSON file persistence shared by settings and high scores
//!
//! Features:
//! - Per-user directories resolved through `dirs`
//! - Missing files read as `None`, not an error
//! - Writes go to a temp file first, then rename over the target

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name under the platform config/data roots
pub const APP_DIR: &str = "asteroids";

/// Why a load or save failed
#[derive(Debug)]
pub enum StoreError {
    /// No platform directory could be resolved
    NoDataDir,
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NoDataDir => write!(f, "no user data directory available"),
            StoreError::Io(e) => write!(f, "i/o error: {e}"),
            StoreError::Json(e) => write!(f, "malformed json: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NoDataDir => None,
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// `<data dir>/asteroids/<file>`
pub fn data_file(file: &str) -> Result<PathBuf, StoreError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(file))
        .ok_or(StoreError::NoDataDir)
}

/// `<config dir>/asteroids/<file>`
pub fn config_file(file: &str) -> Result<PathBuf, StoreError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(file))
        .ok_or(StoreError::NoDataDir)
}

/// Read and parse a JSON file; `Ok(None)` if it does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

/// Serialize to a sibling temp file, then rename into place
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
