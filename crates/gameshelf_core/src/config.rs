//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Decide where the game store lives and how logging is set up.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - An invalid log level or a relative log dir is an error, never silently
//!   replaced by a default.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GAMESHELF_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GAMESHELF_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GAMESHELF_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "gameshelf.sqlite3";

/// Store and logging settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl ShelfConfig {
    /// Reads `GAMESHELF_*` variables from the environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV)
            .map(|dir| normalize_log_dir(&dir))
            .transpose()?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
