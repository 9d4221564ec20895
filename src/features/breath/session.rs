//! Breath phase cycle timer.
//!
//! A [`BreathSession`] is an owned handle returned by [`BreathSession::start`].
//! The host calls [`BreathSession::tick`] on a fixed interval and renders the
//! returned [`TickSnapshot`]; the session itself owns no timers and does no I/O.
//!
//! Elapsed time is the sum of tick deltas, not wall-clock time. Deltas are
//! accumulated as `Duration` (integer nanoseconds) so a 100 ms quantum adds up
//! exactly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::pattern::{seconds_to_duration, BreathPattern};
use super::phase::BreathPhase;
use crate::error::BreatheError;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Ticks advance the clock
    Running,
    /// Ticks are ignored until resumed
    Paused,
    /// Reset to zero; the next tick re-enters the first phase
    Idle,
    /// Total duration reached
    Completed,
}

/// Mutable run-time clock of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionClock {
    /// Position within the active (non-zero) phase list
    pub phase_index: usize,
    /// Time spent in the current phase
    pub phase_elapsed: Duration,
    /// Time since the session started
    pub total_elapsed: Duration,
}

impl SessionClock {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of a session after a tick, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Current phase (`Idle` once completed or reset)
    pub phase: BreathPhase,
    /// Fraction of the current phase elapsed, in `[0, 1]`
    pub phase_progress: f64,
    /// Seconds into the current phase
    pub phase_elapsed_seconds: f64,
    /// Seconds since the session started
    pub total_elapsed_seconds: f64,
    /// Seconds left in the session, `None` when unbounded
    pub remaining_seconds: Option<f64>,
    /// Text prompt for the current phase
    pub guidance: String,
    /// Number of full cycles finished
    pub cycles_completed: u32,
    /// Whether this tick entered a new phase
    pub transitioned: bool,
    /// Whether the session has reached its total duration
    pub completed: bool,
}

/// Summary of a session returned by [`BreathSession::stop`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Seconds of breathing accumulated from ticks
    pub elapsed_seconds: f64,
    /// Configured session length in seconds, `None` when unbounded
    pub planned_seconds: Option<f64>,
    /// Number of full cycles finished
    pub cycles_completed: u32,
    /// Whether the session ran to its total duration
    pub completed: bool,
}

/// A running breathing session.
#[derive(Debug, Clone)]
pub struct BreathSession {
    pattern: BreathPattern,
    phases: Vec<BreathPhase>,
    total: Option<Duration>,
    clock: SessionClock,
    status: SessionStatus,
    cycles_completed: u32,
}

impl BreathSession {
    /// Start a session.
    ///
    /// A zero `total` means unbounded (SOS mode): the session only ends when
    /// stopped.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern has no phase with
    /// a positive duration.
    pub fn start(pattern: BreathPattern, total: Duration) -> Result<Self, BreatheError> {
        let phases = pattern.active_phases();
        if phases.is_empty() {
            return Err(BreatheError::InvalidPattern(
                "pattern has no phase with a positive duration".to_string(),
            ));
        }

        let total = (!total.is_zero()).then_some(total);
        info!(
            timings = %pattern.timings(),
            total_secs = total.map(|t| t.as_secs_f64()),
            "breath session started"
        );

        Ok(Self {
            pattern,
            phases,
            total,
            clock: SessionClock::default(),
            status: SessionStatus::Running,
            cycles_completed: 0,
        })
    }

    /// Start a session with the total given in seconds.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern has no phase with
    /// a positive duration.
    pub fn start_seconds(pattern: BreathPattern, total_seconds: f64) -> Result<Self, BreatheError> {
        Self::start(pattern, seconds_to_duration(total_seconds))
    }

    /// Advance the clock by `delta` and return the new state.
    ///
    /// Paused and completed sessions are not advanced. An idle (reset)
    /// session re-enters its first phase.
    pub fn tick(&mut self, delta: Duration) -> TickSnapshot {
        let mut transitioned = false;

        match self.status {
            SessionStatus::Completed | SessionStatus::Paused => return self.snapshot_with(false),
            SessionStatus::Idle => {
                self.status = SessionStatus::Running;
                self.clock.phase_index = 0;
                transitioned = true;
            }
            SessionStatus::Running => {}
        }

        self.clock.phase_elapsed += delta;
        self.clock.total_elapsed += delta;

        if let Some(total) = self.total {
            if self.clock.total_elapsed >= total {
                self.status = SessionStatus::Completed;
                info!(
                    elapsed_secs = self.clock.total_elapsed.as_secs_f64(),
                    cycles = self.cycles_completed,
                    "breath session completed"
                );
                return self.snapshot_with(true);
            }
        }

        let current = self.current_cycle_phase();
        if self.clock.phase_elapsed >= self.pattern.duration(current) {
            self.clock.phase_elapsed = Duration::ZERO;
            self.clock.phase_index = (self.clock.phase_index + 1) % self.phases.len();
            if self.clock.phase_index == 0 {
                self.cycles_completed += 1;
            }
            transitioned = true;
            debug!(from = %current, to = %self.current_cycle_phase(), "phase transition");
        }

        self.snapshot_with(transitioned)
    }

    /// Advance the clock by `delta_seconds`. Negative or non-finite deltas
    /// count as zero.
    pub fn tick_seconds(&mut self, delta_seconds: f64) -> TickSnapshot {
        self.tick(seconds_to_duration(delta_seconds))
    }

    /// Stop the session, returning to idle.
    #[must_use]
    pub fn stop(self) -> SessionOutcome {
        let outcome = SessionOutcome {
            elapsed_seconds: self.clock.total_elapsed.as_secs_f64(),
            planned_seconds: self.total.map(|t| t.as_secs_f64()),
            cycles_completed: self.cycles_completed,
            completed: self.status == SessionStatus::Completed,
        };
        info!(
            elapsed_secs = outcome.elapsed_seconds,
            completed = outcome.completed,
            "breath session stopped"
        );
        outcome
    }

    /// Zero the clock and return to idle, keeping the pattern and total.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.cycles_completed = 0;
        self.status = SessionStatus::Idle;
        debug!("breath session reset");
    }

    /// Stop advancing on ticks.
    pub fn pause(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Paused;
        }
    }

    /// Continue a paused session from exactly where it left off.
    pub fn resume(&mut self) {
        if self.status == SessionStatus::Paused {
            self.status = SessionStatus::Running;
        }
    }

    /// Toggle between paused and running.
    pub fn toggle_pause(&mut self) {
        match self.status {
            SessionStatus::Running => self.pause(),
            SessionStatus::Paused => self.resume(),
            SessionStatus::Idle | SessionStatus::Completed => {}
        }
    }

    /// Current state without advancing the clock.
    #[must_use]
    pub fn snapshot(&self) -> TickSnapshot {
        self.snapshot_with(false)
    }

    /// Current phase; `Idle` when completed or reset.
    #[must_use]
    pub fn phase(&self) -> BreathPhase {
        match self.status {
            SessionStatus::Idle | SessionStatus::Completed => BreathPhase::Idle,
            SessionStatus::Running | SessionStatus::Paused => self.current_cycle_phase(),
        }
    }

    /// Fraction of the current phase elapsed, clamped to `[0, 1]`.
    #[must_use]
    pub fn phase_progress(&self) -> f64 {
        let phase = self.phase();
        if phase == BreathPhase::Idle {
            return 0.0;
        }
        let duration = self.pattern.duration(phase).as_secs_f64();
        if duration <= 0.0 {
            return 0.0;
        }
        (self.clock.phase_elapsed.as_secs_f64() / duration).clamp(0.0, 1.0)
    }

    /// Fraction of the total duration elapsed, `None` when unbounded.
    #[must_use]
    pub fn session_progress(&self) -> Option<f64> {
        self.total.map(|total| {
            (self.clock.total_elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        })
    }

    /// The clock fields.
    #[must_use]
    pub const fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// The pattern being played.
    #[must_use]
    pub const fn pattern(&self) -> &BreathPattern {
        &self.pattern
    }

    /// The phases played back, in order.
    #[must_use]
    pub fn phases(&self) -> &[BreathPhase] {
        &self.phases
    }

    /// Configured total, `None` when unbounded.
    #[must_use]
    pub const fn total(&self) -> Option<Duration> {
        self.total
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Check if the session reached its total duration.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Check if the session is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }

    fn current_cycle_phase(&self) -> BreathPhase {
        self.phases
            .get(self.clock.phase_index)
            .copied()
            .unwrap_or(BreathPhase::Idle)
    }

    fn snapshot_with(&self, transitioned: bool) -> TickSnapshot {
        let phase = self.phase();
        TickSnapshot {
            phase,
            phase_progress: self.phase_progress(),
            phase_elapsed_seconds: self.clock.phase_elapsed.as_secs_f64(),
            total_elapsed_seconds: self.clock.total_elapsed.as_secs_f64(),
            remaining_seconds: self
                .total
                .map(|total| total.saturating_sub(self.clock.total_elapsed).as_secs_f64()),
            guidance: self.pattern.guidance_for(phase).to_string(),
            cycles_completed: self.cycles_completed,
            transitioned,
            completed: self.status == SessionStatus::Completed,
        }
    }
}
