//! Guided breathing.
//!
//! Turns a breathing pattern into a stream of phase and progress snapshots:
//! - Patterns and validation
//! - The phase cycle timer
//! - Built-in and custom pattern catalog
//! - Visual pulse mapping for renderers
//! - Headless timeline simulation

pub mod catalog;
pub mod pattern;
pub mod phase;
pub mod session;
pub mod simulate;
pub mod visual;

pub use catalog::{CustomPattern, PatternEntry, SOS_PATTERN_ID};
pub use pattern::{BreathPattern, PhaseGuidance};
pub use phase::BreathPhase;
pub use session::{BreathSession, SessionClock, SessionOutcome, SessionStatus, TickSnapshot};
pub use simulate::{simulate, Simulation, TimelineEvent};
pub use visual::{pulse, PulseParams};
