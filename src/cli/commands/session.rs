//! Breathing session commands.
//!
//! Handles live sessions, SOS mode and headless timeline previews.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::cli::args::{OutputFormat, SimulateArgs, StartArgs};
use crate::config::{Config, TICK_INTERVAL_RANGE};
use crate::core::duration::{format_duration, parse_duration};
use crate::error::BreatheError;
use crate::features::breath::simulate::MAX_SIMULATED_TICKS;
use crate::features::breath::{catalog, simulate, BreathSession, PatternEntry, SOS_PATTERN_ID};
use crate::features::journal::{record_session, JournalEntry, JournalStorage};
use crate::output::{format_outcome, format_simulation};
use crate::tui;

/// What to run: a pattern and a session length.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    /// Resolved pattern
    pub entry: PatternEntry,
    /// Total length; zero means unbounded
    pub length: Duration,
}

impl SessionPlan {
    /// Resolve a pattern id and length against the catalog and config.
    ///
    /// Length precedence: `unbounded`, then `duration`, then the pattern's
    /// own default, then `session.default_duration_minutes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is unknown or the duration is invalid.
    pub fn resolve(
        config: &Config,
        pattern: Option<&str>,
        duration: Option<&str>,
        unbounded: bool,
    ) -> Result<Self, BreatheError> {
        let id = pattern.unwrap_or(config.session.default_pattern.as_str());
        let entry = catalog::find(id, &config.patterns)?;

        let length = if unbounded {
            Duration::ZERO
        } else if let Some(d) = duration {
            parse_duration(d)?
        } else {
            entry.session_length(config.session.default_duration_minutes)
        };

        Ok(Self { entry, length })
    }

    /// Start a session for this plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be played.
    pub fn session(&self) -> Result<BreathSession, BreatheError> {
        BreathSession::start(self.entry.pattern.clone(), self.length)
    }
}

/// Execute the start command.
///
/// # Errors
///
/// Returns an error if the plan is invalid, the terminal cannot be driven,
/// or the journal cannot be written.
pub fn start(config: &Config, args: StartArgs, format: OutputFormat) -> Result<String, BreatheError> {
    let plan = SessionPlan::resolve(
        config,
        args.pattern.as_deref(),
        args.duration.as_deref(),
        args.unbounded,
    )?;
    run_live(config, &plan, args.notes, !args.no_record, format)
}

/// Execute the sos command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven or the journal cannot
/// be written.
pub fn sos(
    config: &Config,
    notes: Option<String>,
    no_record: bool,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let plan = SessionPlan::resolve(config, Some(SOS_PATTERN_ID), None, true)?;
    run_live(config, &plan, notes, !no_record, format)
}

fn run_live(
    config: &Config,
    plan: &SessionPlan,
    notes: Option<String>,
    record: bool,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let session = plan.session()?;
    info!(
        pattern = %plan.entry.id,
        length_secs = plan.length.as_secs(),
        "starting live session"
    );

    let started_at = Utc::now();
    let outcome = tui::run_session(session, &plan.entry, &config.session)?;
    let ended_at = Utc::now();

    let recorded = if record && config.session.record_history {
        let storage = JournalStorage::new()?;
        let mut entry = JournalEntry::from_outcome(
            &plan.entry.id,
            &plan.entry.pattern,
            started_at,
            ended_at,
            &outcome,
            notes,
        );
        record_session(&storage, &mut entry)?
    } else {
        None
    };

    format_outcome(&plan.entry, &outcome, recorded, format)
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the plan or tick interval is invalid, or if a
/// bounded session needs more than [`MAX_SIMULATED_TICKS`] ticks.
pub fn simulate_timeline(
    config: &Config,
    args: &SimulateArgs,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let plan = SessionPlan::resolve(config, args.pattern.as_deref(), args.duration.as_deref(), false)?;

    let tick_ms = args.tick.unwrap_or(config.session.tick_interval_ms);
    if !TICK_INTERVAL_RANGE.contains(&tick_ms) {
        return Err(BreatheError::InvalidDuration(format!(
            "tick must be between {} and {} ms, got {tick_ms}",
            TICK_INTERVAL_RANGE.start(),
            TICK_INTERVAL_RANGE.end()
        )));
    }

    let quantum = Duration::from_millis(tick_ms);
    let ticks_needed = plan.length.as_nanos().div_ceil(quantum.as_nanos());
    if args.cycles.is_none() && ticks_needed > u128::from(MAX_SIMULATED_TICKS) {
        return Err(BreatheError::InvalidDuration(format!(
            "{} at {tick_ms} ms per tick needs more than {MAX_SIMULATED_TICKS} ticks, \
             use a longer --tick or --cycles",
            format_duration(plan.length)
        )));
    }

    let simulation = simulate(plan.session()?, quantum, args.cycles);
    format_simulation(&plan.entry, &simulation, format)
}
