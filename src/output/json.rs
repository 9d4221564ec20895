//! JSON output formatting for breathe.

use serde::Serialize;
use serde_json::json;

use crate::error::BreatheError;
use crate::features::breath::{BreathPhase, PatternEntry, SessionOutcome, Simulation};
use crate::features::journal::JournalEntry;

fn pattern_value(entry: &PatternEntry) -> serde_json::Value {
    let pattern = &entry.pattern;
    json!({
        "id": entry.id,
        "label": entry.label,
        "tag": entry.tag,
        "description": entry.description,
        "builtin": entry.builtin,
        "unbounded": entry.unbounded,
        "default_minutes": entry.default_minutes,
        "recommended_cycles": entry.recommended_cycles,
        "timings": pattern.timings(),
        "inhale": pattern.seconds(BreathPhase::Inhale),
        "hold": pattern.seconds(BreathPhase::Hold),
        "exhale": pattern.seconds(BreathPhase::Exhale),
        "hold_after": pattern.seconds(BreathPhase::HoldAfter),
        "cycle_seconds": pattern.cycle_seconds(),
        "breaths_per_minute": pattern.breaths_per_minute(),
    })
}

/// Format the pattern catalog as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_patterns_json(entries: &[PatternEntry]) -> Result<String, BreatheError> {
    let items: Vec<_> = entries.iter().map(pattern_value).collect();
    let output = json!({
        "count": entries.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single pattern as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_pattern_json(entry: &PatternEntry) -> Result<String, BreatheError> {
    let mut value = pattern_value(entry);
    value["guidance"] = json!({
        "inhale": entry.pattern.guidance_for(BreathPhase::Inhale),
        "hold": entry.pattern.guidance_for(BreathPhase::Hold),
        "exhale": entry.pattern.guidance_for(BreathPhase::Exhale),
        "hold_after": entry.pattern.guidance_for(BreathPhase::HoldAfter),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Format a simulated timeline as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_simulation_json(
    entry: &PatternEntry,
    simulation: &Simulation,
) -> Result<String, BreatheError> {
    let output = json!({
        "pattern": entry.id,
        "timings": entry.pattern.timings(),
        "ticks": simulation.ticks,
        "truncated": simulation.truncated,
        "events": simulation.events,
        "outcome": simulation.outcome,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a finished session as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_outcome_json(
    entry: &PatternEntry,
    outcome: &SessionOutcome,
    recorded: Option<i64>,
) -> Result<String, BreatheError> {
    let output = json!({
        "pattern": entry.id,
        "outcome": outcome,
        "journal_id": recorded,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format journal entries as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_history_json(entries: &[JournalEntry]) -> Result<String, BreatheError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreatheError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::features::breath::{catalog, simulate, BreathSession};

    #[test]
    fn test_format_patterns_json() {
        let entries = catalog::builtins();
        let result = format_patterns_json(&entries).unwrap();

        assert!(result.contains(&format!("\"count\": {}", entries.len())));
        assert!(result.contains("\"id\": \"box\""));
        assert!(result.contains("\"timings\": \"4-7-8-0\""));
    }

    #[test]
    fn test_format_patterns_json_empty() {
        let result = format_patterns_json(&[]).unwrap();
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_pattern_json_has_guidance() {
        let sos = catalog::builtin("sos").unwrap();
        let result = format_pattern_json(&sos).unwrap();

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["unbounded"], true);
        assert_eq!(value["cycle_seconds"], 12.0);
        assert_eq!(value["guidance"]["hold_after"], "You are safe. Rest...");
    }

    #[test]
    fn test_format_simulation_json() {
        let entry = catalog::builtin("box").unwrap();
        let session = BreathSession::start(entry.pattern.clone(), Duration::from_secs(16)).unwrap();
        let sim = simulate(session, Duration::from_millis(100), None);

        let value: serde_json::Value =
            serde_json::from_str(&format_simulation_json(&entry, &sim).unwrap()).unwrap();
        assert_eq!(value["ticks"], 160);
        assert_eq!(value["truncated"], false);
        assert_eq!(value["events"][1]["phase"], "hold");
        assert_eq!(value["outcome"]["completed"], true);
    }

    #[test]
    fn test_format_outcome_json() {
        let entry = catalog::builtin("calm").unwrap();
        let outcome = SessionOutcome {
            elapsed_seconds: 30.0,
            planned_seconds: None,
            cycles_completed: 3,
            completed: false,
        };
        let result = format_outcome_json(&entry, &outcome, Some(4)).unwrap();
        assert!(result.contains("\"journal_id\": 4"));
        assert!(result.contains("\"planned_seconds\": null"));
    }
}
