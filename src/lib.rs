//! breathe - guided breathing in your terminal
//!
//! This crate provides a breath phase cycle timer, a catalog of breathing
//! patterns, a session journal, and a terminal host that paces the user
//! through each phase.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreatheError;
pub use features::breath::{BreathPattern, BreathPhase, BreathSession, TickSnapshot};
