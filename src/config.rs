//! Runtime paths for the database and the log file.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{Result, StoreError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".playlist-inventory";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "playlists.sqlite";
/// Log file written next to the database; the terminal belongs to the UI.
const LOG_FILE_NAME: &str = "playlist-inventory.log";

/// Overrides the database location.
pub const DB_PATH_ENV: &str = "PLAYLIST_INVENTORY_DB";
/// Overrides the log file location.
pub const LOG_PATH_ENV: &str = "PLAYLIST_INVENTORY_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve paths from the environment, falling back to the home directory.
    pub fn from_env() -> Result<Self> {
        Self::resolve(env::var_os(DB_PATH_ENV), env::var_os(LOG_PATH_ENV))
    }

    /// Build the paths from override values. Missing or empty overrides fall
    /// back to the defaults; the log file follows the database directory.
    pub fn resolve(db_override: Option<OsString>, log_override: Option<OsString>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => data_dir()?.join(DB_FILE_NAME),
        };
        let log_path = match log_override {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => sibling(&db_path, LOG_FILE_NAME),
        };
        Ok(Self { db_path, log_path })
    }

    /// Keep everything inside a single directory, e.g. for tests.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE_NAME),
            log_path: dir.join(LOG_FILE_NAME),
        }
    }

    /// Create the parent directories of both files.
    pub fn ensure_dirs(&self) -> Result<()> {
        for path in [&self.db_path, &self.log_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        Ok(())
    }
}

/// Resolve the absolute path to the application directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| StoreError::DataDirectory("could not locate home directory".into()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
