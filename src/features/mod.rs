//! Feature implementations for breathe.
//!
//! This module contains:
//! - Breathing patterns and the phase cycle timer
//! - The session journal

pub mod breath;
pub mod journal;
