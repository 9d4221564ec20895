//! Configuration settings for breathe.
//!
//! Settings are loaded from `~/.breathe/config.yaml`.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::BreatheError;
use crate::features::breath::catalog::{self, CustomPattern};

/// Accepted range for the tick interval, in milliseconds.
pub const TICK_INTERVAL_RANGE: std::ops::RangeInclusive<u64> = 10..=1000;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Breathing session settings.
    pub session: SessionConfig,
    /// User-authored patterns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<CustomPattern>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Breathing session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pattern used when `start` is given no pattern.
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    /// Session length in minutes when neither the command line nor the
    /// pattern specifies one.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// Tick quantum in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Log a warning when tick time and wall-clock time diverge by more than
    /// this many milliseconds.
    #[serde(default = "default_drift_warn_ms")]
    pub drift_warn_ms: u64,
    /// Record finished sessions in the journal.
    #[serde(default = "default_true")]
    pub record_history: bool,
}

impl SessionConfig {
    /// Tick quantum as a `Duration`.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Drift threshold as a `Duration`.
    #[must_use]
    pub const fn drift_threshold(&self) -> Duration {
        Duration::from_millis(self.drift_warn_ms)
    }
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_pattern() -> String {
    "box".to_string()
}

const fn default_duration_minutes() -> u32 {
    5
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_drift_warn_ms() -> u64 {
    500
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
            default_duration_minutes: default_duration_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
            drift_warn_ms: default_drift_warn_ms(),
            record_history: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation.
    pub fn load() -> Result<Self, BreatheError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BreatheError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreatheError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            BreatheError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        config.validate()?;
        debug!(
            path = %path.display(),
            custom_patterns = config.patterns.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Check settings that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Config` naming the offending setting.
    pub fn validate(&self) -> Result<(), BreatheError> {
        if !TICK_INTERVAL_RANGE.contains(&self.session.tick_interval_ms) {
            return Err(BreatheError::Config(format!(
                "session.tick_interval_ms must be between {} and {}, got {}",
                TICK_INTERVAL_RANGE.start(),
                TICK_INTERVAL_RANGE.end(),
                self.session.tick_interval_ms
            )));
        }

        let mut seen = HashSet::new();
        for pattern in &self.patterns {
            let id = pattern.id.trim().to_lowercase();
            if id.is_empty() {
                return Err(BreatheError::Config("Custom pattern with an empty id".to_string()));
            }
            if catalog::is_builtin_id(&id) {
                return Err(BreatheError::Config(format!(
                    "Custom pattern '{}' has the same id as a built-in pattern",
                    pattern.id
                )));
            }
            if !seen.insert(id) {
                return Err(BreatheError::Config(format!(
                    "Custom pattern '{}' is defined more than once",
                    pattern.id
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), BreatheError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BreatheError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| BreatheError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            BreatheError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }
}
