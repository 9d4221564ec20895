//! Headless playback of a session.
//!
//! Drives a [`BreathSession`] with a fixed quantum, without real time, and
//! records every phase change. Used by `breathe simulate` to preview a
//! pattern's timeline.

use std::time::Duration;

use serde::Serialize;

use super::phase::BreathPhase;
use super::session::{BreathSession, SessionOutcome};

/// Upper bound on ticks in one simulation.
pub const MAX_SIMULATED_TICKS: u64 = 1_000_000;

/// A phase change during playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    /// Session time when the phase began, in seconds
    pub at_seconds: f64,
    /// Phase entered
    pub phase: BreathPhase,
    /// Guidance text for the phase
    pub guidance: String,
    /// Cycles finished before this phase began
    pub cycle: u32,
}

/// Result of a headless run.
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Phase changes in order, starting with the first phase
    pub events: Vec<TimelineEvent>,
    /// Number of ticks delivered
    pub ticks: u64,
    /// Playback hit [`MAX_SIMULATED_TICKS`] before the session ended
    pub truncated: bool,
    /// Final state of the session
    pub outcome: SessionOutcome,
}

/// Play a session until it completes or `max_cycles` full cycles have run.
///
/// Unbounded sessions with no cycle limit stop after one cycle. Playback
/// never runs past [`MAX_SIMULATED_TICKS`]; a run cut short there is marked
/// `truncated`.
#[must_use]
pub fn simulate(mut session: BreathSession, quantum: Duration, max_cycles: Option<u32>) -> Simulation {
    let max_cycles = match (max_cycles, session.total()) {
        (Some(cycles), _) => Some(cycles.max(1)),
        (None, None) => Some(1),
        (None, Some(_)) => None,
    };

    let start = session.snapshot();
    let mut events = vec![TimelineEvent {
        at_seconds: 0.0,
        phase: start.phase,
        guidance: start.guidance,
        cycle: 0,
    }];
    let mut ticks = 0;
    let mut finished = quantum.is_zero();

    while ticks < MAX_SIMULATED_TICKS && !finished {
        let snap = session.tick(quantum);
        ticks += 1;

        if max_cycles.is_some_and(|max| snap.cycles_completed >= max) {
            finished = true;
            break;
        }
        if snap.transitioned || snap.completed {
            events.push(TimelineEvent {
                at_seconds: snap.total_elapsed_seconds,
                phase: snap.phase,
                guidance: snap.guidance,
                cycle: snap.cycles_completed,
            });
        }
        if snap.completed {
            finished = true;
        }
    }

    Simulation {
        events,
        ticks,
        truncated: !finished,
        outcome: session.stop(),
    }
}
