//! Journal storage.
//!
//! Persists breathing sessions to the local database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::entry::{EntryOutcome, JournalEntry};
use crate::error::BreatheError;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, pattern_id, timings, started_at, ended_at, \
     elapsed_seconds, planned_seconds, cycles, completed, notes FROM breath_sessions";

/// Storage for journal entries.
pub struct JournalStorage {
    db: Database,
}

impl JournalStorage {
    /// Open the journal in the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, BreatheError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Save an entry.
    ///
    /// If the entry has an ID, it will be updated. Otherwise, it will be inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, entry: &mut JournalEntry) -> Result<(), BreatheError> {
        if entry.id.is_some() {
            self.update(entry)
        } else {
            self.insert(entry)
        }
    }

    fn insert(&self, entry: &mut JournalEntry) -> Result<(), BreatheError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO breath_sessions
              (pattern_id, timings, started_at, ended_at, elapsed_seconds, planned_seconds, cycles, completed, notes)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.pattern_id,
                entry.timings,
                timestamp(entry.started_at),
                timestamp(entry.ended_at),
                entry.elapsed_seconds,
                entry.planned_seconds,
                entry.cycles,
                entry.is_completed(),
                entry.notes,
            ],
        )
        .map_err(|e| BreatheError::Database(format!("Failed to insert session: {e}")))?;

        let id = conn.last_insert_rowid();
        entry.id = Some(id);
        debug!(id, pattern = %entry.pattern_id, "journal entry saved");
        Ok(())
    }

    fn update(&self, entry: &JournalEntry) -> Result<(), BreatheError> {
        self.db
            .connection()
            .execute(
                r"UPDATE breath_sessions SET
                  pattern_id = ?1,
                  timings = ?2,
                  started_at = ?3,
                  ended_at = ?4,
                  elapsed_seconds = ?5,
                  planned_seconds = ?6,
                  cycles = ?7,
                  completed = ?8,
                  notes = ?9
                  WHERE id = ?10",
                params![
                    entry.pattern_id,
                    entry.timings,
                    timestamp(entry.started_at),
                    timestamp(entry.ended_at),
                    entry.elapsed_seconds,
                    entry.planned_seconds,
                    entry.cycles,
                    entry.is_completed(),
                    entry.notes,
                    entry.id,
                ],
            )
            .map_err(|e| BreatheError::Database(format!("Failed to update session: {e}")))?;

        Ok(())
    }

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<JournalEntry>, BreatheError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_entry)
            .optional()
            .map_err(|e| BreatheError::Database(format!("Failed to query session: {e}")))
    }

    /// Get the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<JournalEntry>, BreatheError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!("{SELECT_COLUMNS} ORDER BY started_at DESC LIMIT ?1"),
            params![limit],
        )
    }

    /// Get entries that started in `[start, end)`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, BreatheError> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE started_at >= ?1 AND started_at < ?2 ORDER BY started_at DESC"
            ),
            params![timestamp(start), timestamp(end)],
        )
    }

    /// Get the most recent entries for one pattern, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn by_pattern(&self, pattern_id: &str, limit: usize) -> Result<Vec<JournalEntry>, BreatheError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE pattern_id = ?1 COLLATE NOCASE ORDER BY started_at DESC LIMIT ?2"
            ),
            params![pattern_id, limit],
        )
    }

    /// Start times of every recorded session, for streaks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn session_starts(&self) -> Result<Vec<DateTime<Utc>>, BreatheError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT started_at FROM breath_sessions ORDER BY started_at")
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| parse_timestamp(row, 0))
            .map_err(|e| BreatheError::Database(format!("Failed to query sessions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| BreatheError::Database(e.to_string()))
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool, BreatheError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM breath_sessions WHERE id = ?1", [id])
            .map_err(|e| BreatheError::Database(format!("Failed to delete session: {e}")))?;

        Ok(rows > 0)
    }

    /// Delete every entry, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, BreatheError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM breath_sessions", [])
            .map_err(|e| BreatheError::Database(format!("Failed to clear sessions: {e}")))?;

        debug!(rows, "journal cleared");
        Ok(rows)
    }

    fn query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<JournalEntry>, BreatheError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_entry)
            .map_err(|e| BreatheError::Database(format!("Failed to query sessions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| BreatheError::Database(e.to_string()))
    }
}

/// Stored timestamps use a fixed-width UTC form so they order as text.
fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_entry(row: &Row<'_>) -> Result<JournalEntry, rusqlite::Error> {
    let completed: bool = row.get(8)?;

    Ok(JournalEntry {
        id: Some(row.get(0)?),
        pattern_id: row.get(1)?,
        timings: row.get(2)?,
        started_at: parse_timestamp(row, 3)?,
        ended_at: parse_timestamp(row, 4)?,
        elapsed_seconds: row.get(5)?,
        planned_seconds: row.get(6)?,
        cycles: row.get(7)?,
        outcome: if completed {
            EntryOutcome::Completed
        } else {
            EntryOutcome::Stopped
        },
        notes: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn create_test_storage() -> JournalStorage {
        let db = Database::open_in_memory().unwrap();
        JournalStorage::with_database(db)
    }

    fn entry(pattern_id: &str, started_at: DateTime<Utc>, completed: bool) -> JournalEntry {
        JournalEntry {
            id: None,
            pattern_id: pattern_id.to_string(),
            timings: "4-4-4-4".to_string(),
            started_at,
            ended_at: started_at + Duration::minutes(4),
            elapsed_seconds: 240.0,
            planned_seconds: Some(240.0),
            cycles: 15,
            outcome: if completed {
                EntryOutcome::Completed
            } else {
                EntryOutcome::Stopped
            },
            notes: None,
        }
    }

    #[test]
    fn test_save_and_get() {
        let storage = create_test_storage();

        let mut saved = entry("box", Utc::now(), true);
        saved.notes = Some("before the meeting".to_string());
        storage.save(&mut saved).unwrap();
        assert!(saved.id.is_some());

        let loaded = storage.get(saved.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded.pattern_id, "box");
        assert_eq!(loaded.notes.as_deref(), Some("before the meeting"));
        assert_eq!(loaded.outcome, EntryOutcome::Completed);
        assert_eq!(loaded.started_at.timestamp(), saved.started_at.timestamp());
    }

    #[test]
    fn test_update() {
        let storage = create_test_storage();
        let mut saved = entry("box", Utc::now(), false);
        storage.save(&mut saved).unwrap();

        saved.notes = Some("edited".to_string());
        storage.save(&mut saved).unwrap();

        let loaded = storage.get(saved.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded.notes.as_deref(), Some("edited"));
        assert_eq!(storage.recent(10).unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let storage = create_test_storage();
        assert!(storage.get(42).unwrap().is_none());
    }

    #[test]
    fn test_recent_newest_first() {
        let storage = create_test_storage();
        let now = Utc::now();

        for i in 0..5 {
            let mut e = entry("box", now - Duration::hours(i), true);
            storage.save(&mut e).unwrap();
        }

        let recent = storage.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent[0].started_at > recent[1].started_at);
    }

    #[test]
    fn test_range_and_by_pattern() {
        let storage = create_test_storage();
        let now = Utc::now();

        let mut old = entry("calm", now - Duration::days(10), true);
        let mut fresh = entry("box", now - Duration::hours(1), true);
        let mut sos = entry("sos", now - Duration::hours(2), false);
        storage.save(&mut old).unwrap();
        storage.save(&mut fresh).unwrap();
        storage.save(&mut sos).unwrap();

        let week = storage.range(now - Duration::days(7), now).unwrap();
        assert_eq!(week.len(), 2);

        let calm = storage.by_pattern("CALM", 10).unwrap();
        assert_eq!(calm.len(), 1);
        assert_eq!(calm[0].pattern_id, "calm");

        assert_eq!(storage.session_starts().unwrap().len(), 3);
    }

    #[test]
    fn test_delete_and_clear() {
        let storage = create_test_storage();

        let mut a = entry("box", Utc::now(), true);
        let mut b = entry("box", Utc::now(), true);
        storage.save(&mut a).unwrap();
        storage.save(&mut b).unwrap();

        let id = a.id.unwrap();
        assert!(storage.delete(id).unwrap());
        assert!(!storage.delete(id).unwrap());
        assert!(storage.get(id).unwrap().is_none());

        assert_eq!(storage.clear().unwrap(), 1);
        assert!(storage.recent(10).unwrap().is_empty());
    }
}
