//! Core utilities shared across features.

pub mod duration;

pub use duration::{format_duration, format_mmss, parse_duration, render_progress_bar};
