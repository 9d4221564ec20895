//! Storage layer for breathe.
//!
//! SQLite-based persistence for the breathing session journal.

mod database;
mod migrations;

pub use database::Database;
