//! Session journal.
//!
//! Records finished breathing sessions and summarizes practice:
//! - Journal entries built from session outcomes
//! - SQLite-backed storage
//! - Period reports with streaks

pub mod entry;
pub mod report;
pub mod sink;
pub mod storage;

pub use entry::{EntryOutcome, JournalEntry};
pub use report::{JournalReport, ReportPeriod};
pub use sink::{record_session, JournalSink, MIN_RECORDED_SECONDS};
pub use storage::JournalStorage;
