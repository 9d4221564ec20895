//! Map session snapshots to visual pulse parameters.
//!
//! The timer only reports phase and progress; renderers call [`pulse`] to get
//! the size and brightness of the breathing shape.

use serde::Serialize;

use super::phase::BreathPhase;
use super::session::TickSnapshot;

/// Smallest pulse scale (empty lungs).
pub const MIN_SCALE: f64 = 0.5;
/// Largest pulse scale (full lungs).
pub const MAX_SCALE: f64 = 1.0;

/// Visual parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseParams {
    /// Relative radius in `[MIN_SCALE, MAX_SCALE]`
    pub scale: f64,
    /// Brightness in `[0, 1]`
    pub intensity: f64,
}

/// Ease-in-out curve on `[0, 1]`.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Compute pulse parameters for a phase at a given progress.
#[must_use]
pub fn pulse_at(phase: BreathPhase, progress: f64) -> PulseParams {
    let eased = ease_in_out(progress);
    let span = MAX_SCALE - MIN_SCALE;

    let scale = match phase {
        BreathPhase::Inhale => MIN_SCALE + span * eased,
        BreathPhase::Hold => MAX_SCALE,
        BreathPhase::Exhale => MAX_SCALE - span * eased,
        BreathPhase::HoldAfter | BreathPhase::Idle => MIN_SCALE,
    };

    let intensity = match phase {
        BreathPhase::Idle => 0.2,
        // Holds shimmer slightly so the screen never looks frozen.
        BreathPhase::Hold | BreathPhase::HoldAfter => {
            0.05f64.mul_add((progress * std::f64::consts::TAU * 2.0).sin(), 0.75)
        }
        BreathPhase::Inhale | BreathPhase::Exhale => (scale - MIN_SCALE) / span * 0.6 + 0.4,
    };

    PulseParams {
        scale,
        intensity: intensity.clamp(0.0, 1.0),
    }
}

/// Compute pulse parameters for a snapshot.
#[must_use]
pub fn pulse(snapshot: &TickSnapshot) -> PulseParams {
    pulse_at(snapshot.phase, snapshot.phase_progress)
}
