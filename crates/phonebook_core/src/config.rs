//! Application configuration.
//!
//! Everything is derived from the working directory; no environment
//! variables or command-line flags are read.

use crate::logging::{default_log_level, LogConfig};
use std::path::{Path, PathBuf};

/// File name of the phone book database inside the working directory.
pub const DB_FILE_NAME: &str = "phonebook.db";
/// Directory (relative to the working directory) receiving rolling logs.
pub const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration for the phone book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backing SQLite file, created on first run.
    pub db_path: PathBuf,
    pub log: LogConfig,
}

impl AppConfig {
    /// Builds the configuration rooted at `dir`.
    ///
    /// `dir` should be absolute; the log directory inherits it and logging
    /// rejects relative paths.
    pub fn for_working_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            db_path: dir.join(DB_FILE_NAME),
            log: LogConfig {
                level: default_log_level().to_string(),
                log_dir: dir.join(LOG_DIR_NAME),
            },
        }
    }
}
