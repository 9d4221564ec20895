//! Configuration management for breathe.
//!
//! This module handles loading and saving configuration from `~/.breathe/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, SessionConfig, TICK_INTERVAL_RANGE};
