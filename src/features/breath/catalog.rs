//! Built-in and user-authored breathing patterns.
//!
//! Built-in patterns:
//! - **box**: Focus (4-4-4-4)
//! - **4-7-8**: Tranquility (sleep and anxiety)
//! - **calm**: Balance (4-0-6-0)
//! - **coherence**: Heart rate variability (5-0-5-0)
//! - **triangle**: Steadiness (4-4-4-0)
//! - **deep-relax**: Stress relief (4-0-8-0)
//! - **awake**: Energize (6-0-2-0)
//! - **sos**: Acute anxiety relief, unbounded

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::pattern::{BreathPattern, PhaseGuidance};
use crate::error::BreatheError;

/// Id of the pattern used by SOS mode.
pub const SOS_PATTERN_ID: &str = "sos";

/// A named pattern with descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternEntry {
    /// Unique identifier used on the command line
    pub id: String,
    /// Display label
    pub label: String,
    /// Short category tag
    pub tag: String,
    /// What the pattern is for
    pub description: String,
    /// Phase timings
    pub pattern: BreathPattern,
    /// Suggested number of cycles per session
    pub recommended_cycles: u32,
    /// Default session length in minutes, `None` to use the configured default
    pub default_minutes: Option<u32>,
    /// Whether sessions run until stopped by default
    pub unbounded: bool,
    /// Whether the pattern ships with breathe
    pub builtin: bool,
}

impl PatternEntry {
    /// Default session length; zero means unbounded.
    #[must_use]
    pub fn session_length(&self, fallback_minutes: u32) -> Duration {
        if self.unbounded {
            return Duration::ZERO;
        }
        let minutes = self.default_minutes.unwrap_or(fallback_minutes);
        Duration::from_secs(u64::from(minutes) * 60)
    }
}

/// A pattern defined in the user's config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Unique identifier
    pub id: String,
    /// Display label (defaults to the id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default session length in minutes, `0` for unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_minutes: Option<u32>,
    /// Phase timings and guidance overrides
    #[serde(flatten)]
    pub pattern: BreathPattern,
}

impl CustomPattern {
    /// Convert into a catalog entry.
    #[must_use]
    pub fn to_entry(&self) -> PatternEntry {
        PatternEntry {
            id: self.id.clone(),
            label: self.label.clone().unwrap_or_else(|| self.id.clone()),
            tag: "Custom".to_string(),
            description: self.description.clone().unwrap_or_default(),
            pattern: self.pattern.clone(),
            recommended_cycles: 0,
            default_minutes: self.default_minutes.filter(|m| *m > 0),
            unbounded: self.default_minutes == Some(0),
            builtin: false,
        }
    }
}

struct Builtin {
    id: &'static str,
    label: &'static str,
    tag: &'static str,
    description: &'static str,
    timings: [f64; 4],
    recommended_cycles: u32,
    default_minutes: Option<u32>,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        id: "box",
        label: "Focus",
        tag: "Concentration",
        description: "Equal sides of inhale, hold, exhale and hold. Steadies attention.",
        timings: [4.0, 4.0, 4.0, 4.0],
        recommended_cycles: 6,
        default_minutes: Some(4),
    },
    Builtin {
        id: "4-7-8",
        label: "Tranquility",
        tag: "Sleep & Anxiety",
        description: "A long hold and longer exhale that settle the nervous system.",
        timings: [4.0, 7.0, 8.0, 0.0],
        recommended_cycles: 4,
        default_minutes: Some(2),
    },
    Builtin {
        id: "calm",
        label: "Balance",
        tag: "Coherence",
        description: "A gentle extended exhale for everyday calm.",
        timings: [4.0, 0.0, 6.0, 0.0],
        recommended_cycles: 8,
        default_minutes: Some(3),
    },
    Builtin {
        id: "coherence",
        label: "Coherence",
        tag: "Heart Health",
        description: "Six breaths a minute to bring heart rhythm into coherence.",
        timings: [5.0, 0.0, 5.0, 0.0],
        recommended_cycles: 30,
        default_minutes: Some(5),
    },
    Builtin {
        id: "triangle",
        label: "Triangle",
        tag: "Stability",
        description: "Inhale, hold, exhale in equal parts with no pause at the bottom.",
        timings: [4.0, 4.0, 4.0, 0.0],
        recommended_cycles: 10,
        default_minutes: Some(3),
    },
    Builtin {
        id: "deep-relax",
        label: "Deep Relax",
        tag: "Stress Relief",
        description: "An exhale twice as long as the inhale to release tension.",
        timings: [4.0, 0.0, 8.0, 0.0],
        recommended_cycles: 10,
        default_minutes: Some(5),
    },
    Builtin {
        id: "awake",
        label: "Energize",
        tag: "Wake Up",
        description: "A long inhale and quick exhale to raise alertness.",
        timings: [6.0, 0.0, 2.0, 0.0],
        recommended_cycles: 12,
        default_minutes: Some(2),
    },
    Builtin {
        id: SOS_PATTERN_ID,
        label: "SOS",
        tag: "Panic Relief",
        description: "Slow, grounding breaths with no time limit. Stop whenever you feel ready.",
        timings: [4.0, 0.0, 6.0, 2.0],
        recommended_cycles: 0,
        default_minutes: None,
    },
];

fn sos_guidance() -> PhaseGuidance {
    PhaseGuidance {
        inhale: Some("Breathe in slowly through your nose...".to_string()),
        hold: None,
        exhale: Some("Let it out, long and slow...".to_string()),
        hold_after: Some("You are safe. Rest...".to_string()),
    }
}

impl Builtin {
    fn to_entry(&self) -> Option<PatternEntry> {
        let [inhale, hold, exhale, hold_after] = self.timings;
        let mut pattern = BreathPattern::new(inhale, hold, exhale, hold_after).ok()?;
        if self.id == SOS_PATTERN_ID {
            pattern = pattern.with_guidance(sos_guidance());
        }

        Some(PatternEntry {
            id: self.id.to_string(),
            label: self.label.to_string(),
            tag: self.tag.to_string(),
            description: self.description.to_string(),
            pattern,
            recommended_cycles: self.recommended_cycles,
            default_minutes: self.default_minutes,
            unbounded: self.default_minutes.is_none(),
            builtin: true,
        })
    }
}

/// All built-in patterns in catalog order.
#[must_use]
pub fn builtins() -> Vec<PatternEntry> {
    BUILTINS.iter().filter_map(Builtin::to_entry).collect()
}

/// Look up a built-in pattern by id (case-insensitive).
#[must_use]
pub fn builtin(id: &str) -> Option<PatternEntry> {
    BUILTINS
        .iter()
        .find(|b| b.id.eq_ignore_ascii_case(id.trim()))
        .and_then(Builtin::to_entry)
}

/// Check whether an id belongs to a built-in pattern.
#[must_use]
pub fn is_builtin_id(id: &str) -> bool {
    BUILTINS.iter().any(|b| b.id.eq_ignore_ascii_case(id.trim()))
}

/// Resolve a pattern id against the built-ins, then the user's patterns.
///
/// # Errors
///
/// Returns `BreatheError::NotFound` if no pattern has this id.
pub fn find(id: &str, custom: &[CustomPattern]) -> Result<PatternEntry, BreatheError> {
    if let Some(entry) = builtin(id) {
        return Ok(entry);
    }

    custom
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(id.trim()))
        .map(CustomPattern::to_entry)
        .ok_or_else(|| {
            BreatheError::NotFound(format!(
                "No breathing pattern named '{id}'. Run 'breathe patterns' to list them."
            ))
        })
}

/// Built-ins followed by user patterns.
#[must_use]
pub fn all(custom: &[CustomPattern]) -> Vec<PatternEntry> {
    let mut entries = builtins();
    entries.extend(custom.iter().map(CustomPattern::to_entry));
    entries
}
