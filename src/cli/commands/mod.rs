//! Command implementations for breathe.
//!
//! This module contains the implementation of all CLI commands.

mod completions;
mod config;
mod journal;
mod patterns;
mod session;

pub use completions::completions;
pub use config::config;
pub use journal::{clear, history, report};
pub use patterns::{patterns, show};
pub use session::{simulate_timeline, sos, start, SessionPlan};
