//! Output formatting for breathe.
//!
//! This module provides formatters for displaying patterns, sessions and the
//! journal in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::breath::{PatternEntry, SessionOutcome, Simulation};
use crate::features::journal::JournalEntry;

pub use json::*;
pub use pretty::*;

/// Format the pattern catalog based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_patterns(
    entries: &[PatternEntry],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_patterns_pretty(entries)),
        OutputFormat::Json => format_patterns_json(entries),
    }
}

/// Format a single pattern based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_pattern(entry: &PatternEntry, format: OutputFormat) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_pattern_pretty(entry)),
        OutputFormat::Json => format_pattern_json(entry),
    }
}

/// Format a simulated timeline based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_simulation(
    entry: &PatternEntry,
    simulation: &Simulation,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_simulation_pretty(entry, simulation)),
        OutputFormat::Json => format_simulation_json(entry, simulation),
    }
}

/// Format a finished session based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_outcome(
    entry: &PatternEntry,
    outcome: &SessionOutcome,
    recorded: Option<i64>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_outcome_pretty(entry, outcome, recorded)),
        OutputFormat::Json => format_outcome_json(entry, outcome, recorded),
    }
}

/// Format journal entries based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_history(
    entries: &[JournalEntry],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(entries)),
        OutputFormat::Json => format_history_json(entries),
    }
}
