//! Breathing patterns.
//!
//! A pattern is the tuple of four phase durations that defines one breathing
//! technique. Patterns are validated on construction and on deserialization,
//! so a `BreathPattern` value always has at least one positive phase.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::phase::BreathPhase;
use crate::error::BreatheError;

/// Longest accepted duration for a single phase, in seconds.
pub const MAX_PHASE_SECONDS: f64 = 600.0;

/// Optional per-phase guidance text overriding the phase defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseGuidance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inhale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_after: Option<String>,
}

impl PhaseGuidance {
    /// Get the override for a phase, if any.
    #[must_use]
    pub fn for_phase(&self, phase: BreathPhase) -> Option<&str> {
        match phase {
            BreathPhase::Inhale => self.inhale.as_deref(),
            BreathPhase::Hold => self.hold.as_deref(),
            BreathPhase::Exhale => self.exhale.as_deref(),
            BreathPhase::HoldAfter => self.hold_after.as_deref(),
            BreathPhase::Idle => None,
        }
    }

    /// Check if no phase is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inhale.is_none()
            && self.hold.is_none()
            && self.exhale.is_none()
            && self.hold_after.is_none()
    }
}

/// Unvalidated pattern as it appears in config files.
#[derive(Debug, Clone, Deserialize)]
struct RawPattern {
    #[serde(default)]
    inhale: f64,
    #[serde(default)]
    hold: f64,
    #[serde(default)]
    exhale: f64,
    #[serde(default)]
    hold_after: f64,
    #[serde(default)]
    guidance: PhaseGuidance,
}

impl TryFrom<RawPattern> for BreathPattern {
    type Error = BreatheError;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.inhale, raw.hold, raw.exhale, raw.hold_after)?.with_guidance(raw.guidance))
    }
}

/// Phase durations, in seconds, for one breathing technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPattern")]
pub struct BreathPattern {
    inhale: f64,
    hold: f64,
    exhale: f64,
    hold_after: f64,
    #[serde(skip_serializing_if = "PhaseGuidance::is_empty")]
    guidance: PhaseGuidance,
}

impl BreathPattern {
    /// Create a validated pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if any duration is negative,
    /// not finite, or longer than [`MAX_PHASE_SECONDS`], or if no duration
    /// lasts at least a nanosecond.
    pub fn new(inhale: f64, hold: f64, exhale: f64, hold_after: f64) -> Result<Self, BreatheError> {
        let durations = [
            (BreathPhase::Inhale, inhale),
            (BreathPhase::Hold, hold),
            (BreathPhase::Exhale, exhale),
            (BreathPhase::HoldAfter, hold_after),
        ];

        for (phase, seconds) in durations {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(BreatheError::InvalidPattern(format!(
                    "{phase} duration must be a non-negative number of seconds, got {seconds}"
                )));
            }
            if seconds > MAX_PHASE_SECONDS {
                return Err(BreatheError::InvalidPattern(format!(
                    "{phase} duration of {seconds}s exceeds the {MAX_PHASE_SECONDS}s limit"
                )));
            }
        }

        if durations
            .iter()
            .all(|(_, seconds)| seconds_to_duration(*seconds).is_zero())
        {
            return Err(BreatheError::InvalidPattern(
                "at least one phase duration must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            inhale,
            hold,
            exhale,
            hold_after,
            guidance: PhaseGuidance::default(),
        })
    }

    /// Attach guidance text overrides.
    #[must_use]
    pub fn with_guidance(mut self, guidance: PhaseGuidance) -> Self {
        self.guidance = guidance;
        self
    }

    /// Duration of a phase in seconds. `Idle` has no duration.
    #[must_use]
    pub const fn seconds(&self, phase: BreathPhase) -> f64 {
        match phase {
            BreathPhase::Inhale => self.inhale,
            BreathPhase::Hold => self.hold,
            BreathPhase::Exhale => self.exhale,
            BreathPhase::HoldAfter => self.hold_after,
            BreathPhase::Idle => 0.0,
        }
    }

    /// Duration of a phase.
    #[must_use]
    pub fn duration(&self, phase: BreathPhase) -> Duration {
        seconds_to_duration(self.seconds(phase))
    }

    /// Whether a phase is played back. Phases shorter than a nanosecond
    /// round to zero and are skipped.
    #[must_use]
    pub fn is_active(&self, phase: BreathPhase) -> bool {
        !self.duration(phase).is_zero()
    }

    /// The phases played back, in order, skipping zero-length phases.
    ///
    /// Never empty for a validated pattern.
    #[must_use]
    pub fn active_phases(&self) -> Vec<BreathPhase> {
        BreathPhase::CYCLE
            .into_iter()
            .filter(|phase| self.is_active(*phase))
            .collect()
    }

    /// Guidance text for a phase: the pattern override, else the default.
    #[must_use]
    pub fn guidance_for(&self, phase: BreathPhase) -> &str {
        self.guidance
            .for_phase(phase)
            .unwrap_or_else(|| phase.default_guidance())
    }

    /// Guidance overrides attached to this pattern.
    #[must_use]
    pub const fn guidance(&self) -> &PhaseGuidance {
        &self.guidance
    }

    /// Length of one full cycle in seconds.
    #[must_use]
    pub fn cycle_seconds(&self) -> f64 {
        self.inhale + self.hold + self.exhale + self.hold_after
    }

    /// Breaths per minute at this pattern's pace.
    #[must_use]
    pub fn breaths_per_minute(&self) -> f64 {
        60.0 / self.cycle_seconds()
    }

    /// Compact timing string such as `4-7-8-0`.
    #[must_use]
    pub fn timings(&self) -> String {
        [self.inhale, self.hold, self.exhale, self.hold_after]
            .iter()
            .map(|s| format_seconds(*s))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Convert seconds to a `Duration`, rounded to the nanosecond.
///
/// Negative and non-finite inputs map to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((seconds * 1_000_000_000.0).round() as u64)
}

/// Format seconds without a trailing `.0` for whole numbers.
fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{seconds:.0}")
    } else {
        format!("{seconds}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let pattern = BreathPattern::new(4.0, 7.0, 8.0, 0.0).unwrap();
        assert_eq!(pattern.seconds(BreathPhase::Hold), 7.0);
        assert_eq!(pattern.duration(BreathPhase::Exhale), Duration::from_secs(8));
        assert_eq!(pattern.cycle_seconds(), 19.0);
    }

    #[test]
    fn test_all_zero_rejected() {
        let err = BreathPattern::new(0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, BreatheError::InvalidPattern(_)));
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(BreathPattern::new(-1.0, 4.0, 4.0, 4.0).is_err());
        assert!(BreathPattern::new(4.0, f64::NAN, 4.0, 4.0).is_err());
        assert!(BreathPattern::new(4.0, 4.0, f64::INFINITY, 4.0).is_err());
        assert!(BreathPattern::new(4.0, 4.0, 4.0, 601.0).is_err());
    }

    #[test]
    fn test_active_phases_skip_zero() {
        let pattern = BreathPattern::new(4.0, 0.0, 6.0, 0.0).unwrap();
        assert_eq!(
            pattern.active_phases(),
            vec![BreathPhase::Inhale, BreathPhase::Exhale]
        );

        let single = BreathPattern::new(0.0, 0.0, 0.0, 3.0).unwrap();
        assert_eq!(single.active_phases(), vec![BreathPhase::HoldAfter]);
    }

    #[test]
    fn test_sub_nanosecond_phases_count_as_zero() {
        let pattern = BreathPattern::new(1e-10, 0.0, 6.0, 0.0).unwrap();
        assert!(!pattern.is_active(BreathPhase::Inhale));
        assert_eq!(pattern.active_phases(), vec![BreathPhase::Exhale]);

        let err = BreathPattern::new(1e-10, 0.0, 4e-10, 0.0).unwrap_err();
        assert!(matches!(err, BreatheError::InvalidPattern(_)));
    }

    #[test]
    fn test_guidance_override() {
        let pattern = BreathPattern::new(4.0, 4.0, 4.0, 4.0)
            .unwrap()
            .with_guidance(PhaseGuidance {
                exhale: Some("Let it all go".to_string()),
                ..PhaseGuidance::default()
            });

        assert_eq!(pattern.guidance_for(BreathPhase::Exhale), "Let it all go");
        assert_eq!(pattern.guidance_for(BreathPhase::Inhale), "Breathe in...");
    }

    #[test]
    fn test_seconds_to_duration() {
        assert_eq!(seconds_to_duration(0.1), Duration::from_millis(100));
        assert_eq!(seconds_to_duration(-3.0), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_breaths_per_minute() {
        let pattern = BreathPattern::new(5.0, 0.0, 5.0, 0.0).unwrap();
        assert!((pattern.breaths_per_minute() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timings() {
        let pattern = BreathPattern::new(4.0, 0.0, 5.5, 0.0).unwrap();
        assert_eq!(pattern.timings(), "4-0-5.5-0");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BreathPattern =
            serde_yaml::from_str("inhale: 4\nexhale: 6\nguidance:\n  inhale: Slowly in\n").unwrap();
        assert_eq!(ok.seconds(BreathPhase::Hold), 0.0);
        assert_eq!(ok.guidance_for(BreathPhase::Inhale), "Slowly in");

        let bad: Result<BreathPattern, _> = serde_yaml::from_str("inhale: 0\nexhale: 0\n");
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_skips_empty_guidance() {
        let pattern = BreathPattern::new(4.0, 4.0, 4.0, 4.0).unwrap();
        let json = serde_json::to_value(&pattern).unwrap();
        assert!(json.get("guidance").is_none());
        assert_eq!(json["hold_after"], 4.0);
    }
}
