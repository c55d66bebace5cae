//! Data directory and database path resolution.
//!
//! Resolution order for the data root:
//! 1. `DEVMON_DATA_DIR`
//! 2. `<system local data dir>/devmon`
//!
//! The database lives at `DEVMON_DATABASE_PATH` when set, otherwise at
//! `<data root>/devmon.db`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DATA_DIR_ENV: &str = "DEVMON_DATA_DIR";
pub const DATABASE_PATH_ENV: &str = "DEVMON_DATABASE_PATH";
pub const DATABASE_FILE_NAME: &str = "devmon.db";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Root directory for devmon's persistent data. Created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var(DATA_DIR_ENV).ok(), dirs::data_local_dir())?;
    ensure_dir(&root)?;
    Ok(root)
}

/// Location of the `SQLite` database file. Its parent directory is created if missing.
pub fn database_path() -> Result<PathBuf, PathError> {
    let path = match env::var(DATABASE_PATH_ENV) {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => data_root()?.join(DATABASE_FILE_NAME),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    Ok(path)
}

fn resolve_data_root(
    override_dir: Option<String>,
    system_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    system_dir
        .map(|d| d.join("devmon"))
        .ok_or(PathError::NoDataDir)
}

fn ensure_dir(path: &Path) -> Result<(), PathError> {
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
