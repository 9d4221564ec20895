//! Where finished sessions go.

use tracing::{debug, info};

use super::entry::JournalEntry;
use super::storage::JournalStorage;
use crate::error::BreatheError;

/// Sessions shorter than this are not recorded.
pub const MIN_RECORDED_SECONDS: f64 = 5.0;

/// A destination for finished sessions.
#[cfg_attr(test, mockall::automock)]
pub trait JournalSink {
    /// Persist an entry, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be stored.
    fn record(&self, entry: &mut JournalEntry) -> Result<(), BreatheError>;
}

impl JournalSink for JournalStorage {
    fn record(&self, entry: &mut JournalEntry) -> Result<(), BreatheError> {
        self.save(entry)
    }
}

/// Record a finished session unless it was too short to count.
///
/// Returns the new entry's id, or `None` when the session was skipped.
///
/// # Errors
///
/// Returns an error if the sink fails.
pub fn record_session(
    sink: &dyn JournalSink,
    entry: &mut JournalEntry,
) -> Result<Option<i64>, BreatheError> {
    if entry.elapsed_seconds < MIN_RECORDED_SECONDS {
        debug!(
            elapsed = entry.elapsed_seconds,
            "session too short to record"
        );
        return Ok(None);
    }

    sink.record(entry)?;
    info!(
        pattern = %entry.pattern_id,
        elapsed = entry.elapsed_seconds,
        outcome = %entry.outcome,
        "session recorded"
    );
    Ok(entry.id)
}
