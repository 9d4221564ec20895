//! Path resolution for breathe configuration and data files.
//!
//! All breathe data is stored in `~/.breathe/` (or `$BREATHE_HOME`):
//! - `config.yaml` - Main configuration file
//! - `breathe.db` - SQLite database holding the session journal
//! - `logs/` - Log files

use std::path::PathBuf;

use crate::error::BreatheError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "BREATHE_HOME";

/// Paths to breathe configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breathe/`
    pub root: PathBuf,
    /// Config file: `~/.breathe/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.breathe/breathe.db`
    pub database: PathBuf,
    /// Logs directory: `~/.breathe/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$BREATHE_HOME`, else the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, BreatheError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME")
            .ok_or_else(|| BreatheError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".breathe")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("breathe.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Log file path.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("breathe.log")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreatheError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    BreatheError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".breathe")))
    }
}
