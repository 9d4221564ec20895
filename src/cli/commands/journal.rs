//! Journal commands.
//!
//! Session history, reports and clearing.

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::journal::{JournalReport, JournalStorage, ReportPeriod};
use crate::output::{format_history, to_json};

/// Execute the history command.
///
/// # Errors
///
/// Returns an error if the journal cannot be read.
pub fn history(
    storage: &JournalStorage,
    limit: usize,
    pattern: Option<&str>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let entries = match pattern {
        Some(id) => storage.by_pattern(id, limit)?,
        None => storage.recent(limit)?,
    };
    format_history(&entries, format)
}

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if the period is unknown or the journal cannot be read.
pub fn report(
    storage: &JournalStorage,
    period: &str,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let period = ReportPeriod::parse(period)?;
    let report = JournalReport::generate(storage, period)?;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

/// Execute the clear command.
///
/// # Errors
///
/// Returns `BreatheError::Config` without `--force`, or an error if the
/// journal cannot be cleared.
pub fn clear(
    storage: &JournalStorage,
    force: bool,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    if !force {
        return Err(BreatheError::Config(
            "This will delete all breathing session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = storage.clear()?;
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "removed": removed })),
        OutputFormat::Pretty => Ok(format!(
            "Session history cleared ({removed} session{}).",
            if removed == 1 { "" } else { "s" }
        )),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::features::journal::{EntryOutcome, JournalEntry};
    use crate::storage::Database;

    fn storage_with(patterns: &[&str]) -> JournalStorage {
        let storage = JournalStorage::with_database(Database::open_in_memory().unwrap());
        for id in patterns {
            let now = Utc::now();
            let mut entry = JournalEntry {
                id: None,
                pattern_id: (*id).to_string(),
                timings: "4-0-6-0".to_string(),
                started_at: now,
                ended_at: now,
                elapsed_seconds: 60.0,
                planned_seconds: Some(60.0),
                cycles: 6,
                outcome: EntryOutcome::Completed,
                notes: None,
            };
            storage.save(&mut entry).unwrap();
        }
        storage
    }

    #[test]
    fn test_history_filters_by_pattern() {
        let storage = storage_with(&["calm", "box", "calm"]);

        let output = history(&storage, 10, Some("calm"), OutputFormat::Json).unwrap();
        assert!(output.contains("\"count\": 2"));

        let output = history(&storage, 1, None, OutputFormat::Json).unwrap();
        assert!(output.contains("\"count\": 1"));
    }

    #[test]
    fn test_report_json() {
        let storage = storage_with(&["box"]);
        let output = report(&storage, "all", OutputFormat::Json).unwrap();
        assert!(output.contains("\"sessions\": 1"));
        assert!(report(&storage, "decade", OutputFormat::Json).is_err());
    }

    #[test]
    fn test_clear_requires_force() {
        let storage = storage_with(&["box", "calm"]);
        assert!(matches!(
            clear(&storage, false, OutputFormat::Pretty),
            Err(BreatheError::Config(_))
        ));
        assert_eq!(storage.recent(10).unwrap().len(), 2);

        let output = clear(&storage, true, OutputFormat::Pretty).unwrap();
        assert_eq!(output, "Session history cleared (2 sessions).");
        assert!(storage.recent(10).unwrap().is_empty());
    }
}
