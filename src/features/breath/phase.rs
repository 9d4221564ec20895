//! Breathing phases.

use serde::{Deserialize, Serialize};

/// A segment of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    /// Breathing in
    Inhale,
    /// Holding with full lungs
    Hold,
    /// Breathing out
    Exhale,
    /// Holding with empty lungs
    HoldAfter,
    /// No session is running
    Idle,
}

impl BreathPhase {
    /// The cycle phases in playback order.
    pub const CYCLE: [Self; 4] = [Self::Inhale, Self::Hold, Self::Exhale, Self::HoldAfter];

    /// Default guidance text shown during this phase.
    #[must_use]
    pub const fn default_guidance(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe in...",
            Self::Hold => "Hold...",
            Self::Exhale => "Breathe out...",
            Self::HoldAfter => "Rest...",
            Self::Idle => "",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
            Self::HoldAfter => "Hold (empty)",
            Self::Idle => "Idle",
        }
    }

    /// Check if this is one of the two holding phases.
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        matches!(self, Self::Hold | Self::HoldAfter)
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
