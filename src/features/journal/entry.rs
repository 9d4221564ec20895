//! Journal entries for finished breathing sessions.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::core::duration::format_seconds_short;
use crate::features::breath::{BreathPattern, SessionOutcome};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOutcome {
    /// Ran to its configured length
    Completed,
    /// Stopped by the user (always the case for unbounded sessions)
    Stopped,
}

impl std::fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// A recorded breathing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Pattern id from the catalog
    pub pattern_id: String,
    /// Pattern timings at the time of the session, e.g. `4-7-8-0`
    pub timings: String,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session ended
    pub ended_at: DateTime<Utc>,
    /// Seconds of breathing
    pub elapsed_seconds: f64,
    /// Planned length in seconds, None when unbounded
    pub planned_seconds: Option<f64>,
    /// Full cycles finished
    pub cycles: u32,
    /// How the session ended
    pub outcome: EntryOutcome,
    /// Optional notes
    pub notes: Option<String>,
}

impl JournalEntry {
    /// Build an entry from a finished session.
    #[must_use]
    pub fn from_outcome(
        pattern_id: &str,
        pattern: &BreathPattern,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        outcome: &SessionOutcome,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: None,
            pattern_id: pattern_id.to_string(),
            timings: pattern.timings(),
            started_at,
            ended_at,
            elapsed_seconds: outcome.elapsed_seconds,
            planned_seconds: outcome.planned_seconds,
            cycles: outcome.cycles_completed,
            outcome: if outcome.completed {
                EntryOutcome::Completed
            } else {
                EntryOutcome::Stopped
            },
            notes,
        }
    }

    /// Check if the session ran to its configured length.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.outcome == EntryOutcome::Completed
    }

    /// Get start time in local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }

    /// One-line summary for display.
    #[must_use]
    pub fn format_status(&self) -> String {
        let planned = self
            .planned_seconds
            .map_or_else(|| "open".to_string(), format_seconds_short);
        format!(
            "{} ({}) - {} of {} - {} cycles [{}]",
            self.pattern_id,
            self.timings,
            format_seconds_short(self.elapsed_seconds),
            planned,
            self.cycles,
            self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(completed: bool) -> SessionOutcome {
        SessionOutcome {
            elapsed_seconds: 240.0,
            planned_seconds: Some(240.0),
            cycles_completed: 15,
            completed,
        }
    }

    #[test]
    fn test_from_outcome() {
        let pattern = BreathPattern::new(4.0, 4.0, 4.0, 4.0).unwrap();
        let now = Utc::now();
        let entry = JournalEntry::from_outcome("box", &pattern, now, now, &outcome(true), None);

        assert_eq!(entry.pattern_id, "box");
        assert_eq!(entry.timings, "4-4-4-4");
        assert_eq!(entry.cycles, 15);
        assert!(entry.is_completed());
        assert!(entry.id.is_none());
    }

    #[test]
    fn test_stopped_outcome() {
        let pattern = BreathPattern::new(4.0, 0.0, 6.0, 2.0).unwrap();
        let now = Utc::now();
        let entry = JournalEntry::from_outcome("sos", &pattern, now, now, &outcome(false), None);
        assert_eq!(entry.outcome, EntryOutcome::Stopped);
    }

    #[test]
    fn test_format_status() {
        let pattern = BreathPattern::new(4.0, 4.0, 4.0, 4.0).unwrap();
        let now = Utc::now();
        let entry = JournalEntry::from_outcome("box", &pattern, now, now, &outcome(true), None);
        assert_eq!(entry.format_status(), "box (4-4-4-4) - 4m of 4m - 15 cycles [Completed]");
    }
}
