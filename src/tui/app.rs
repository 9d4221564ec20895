//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::features::breath::{BreathSession, SessionOutcome, SessionStatus, TickSnapshot};
use crate::tui::event::Action;

/// Most ticks delivered for one wake-up before the schedule is re-based.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

/// Application state.
pub struct App {
    session: BreathSession,
    /// Pattern label shown in the header.
    pub label: String,
    /// Pattern timings shown in the header.
    pub timings: String,
    /// State after the most recent tick.
    pub snapshot: TickSnapshot,
    quantum: Duration,
    next_tick: Instant,
    last_seen: Instant,
    wall_elapsed: Duration,
    drift_threshold: Duration,
    drift_warned: bool,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub fn new(
        session: BreathSession,
        label: &str,
        timings: &str,
        config: &SessionConfig,
        now: Instant,
    ) -> Self {
        let quantum = config.tick_interval();
        Self {
            snapshot: session.snapshot(),
            session,
            label: label.to_string(),
            timings: timings.to_string(),
            quantum,
            next_tick: now + quantum,
            last_seen: now,
            wall_elapsed: Duration::ZERO,
            drift_threshold: config.drift_threshold(),
            drift_warned: false,
            status: None,
            should_quit: false,
        }
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// Deliver every tick that has come due by `now`.
    ///
    /// Each tick advances the session by exactly one quantum. After a long
    /// stall at most [`MAX_CATCH_UP_TICKS`] are delivered and the schedule
    /// restarts from `now`.
    pub fn on_interval(&mut self, now: Instant) {
        self.track_wall(now);

        let mut delivered = 0;
        while self.next_tick <= now && delivered < MAX_CATCH_UP_TICKS {
            let snapshot = self.session.tick(self.quantum);
            if snapshot.completed && !self.snapshot.completed {
                self.status = Some("Session complete. Press q to finish.".to_string());
            }
            self.snapshot = snapshot;
            self.next_tick += self.quantum;
            delivered += 1;
        }

        if self.next_tick <= now {
            debug!(delivered, "tick schedule fell behind, re-basing");
            self.next_tick = now + self.quantum;
        }

        self.check_drift();
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => {
                self.track_wall(now);
                self.session.toggle_pause();
                if self.session.is_paused() {
                    self.status = Some("Paused. Press space to resume.".to_string());
                } else {
                    self.status = None;
                    self.next_tick = now + self.quantum;
                }
                self.snapshot = self.session.snapshot();
            }
            Action::Reset => {
                self.session.reset();
                self.snapshot = self.session.snapshot();
                self.wall_elapsed = Duration::ZERO;
                self.last_seen = now;
                self.next_tick = now + self.quantum;
                self.drift_warned = false;
                self.status = Some("Restarted.".to_string());
            }
        }
    }

    /// Current session status.
    #[must_use]
    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Session progress in `[0, 1]`, `None` when unbounded.
    #[must_use]
    pub fn session_progress(&self) -> Option<f64> {
        self.session.session_progress()
    }

    /// Wall-clock time spent running.
    #[must_use]
    pub const fn wall_elapsed(&self) -> Duration {
        self.wall_elapsed
    }

    /// Whether a drift warning has been logged for this run.
    #[must_use]
    pub const fn drift_warned(&self) -> bool {
        self.drift_warned
    }

    /// Finish the session.
    #[must_use]
    pub fn into_outcome(self) -> SessionOutcome {
        self.session.stop()
    }

    fn track_wall(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_seen);
        self.last_seen = now;
        if self.session.status() == SessionStatus::Running {
            self.wall_elapsed += delta;
        }
    }

    fn check_drift(&mut self) {
        if self.drift_warned || self.session.status() != SessionStatus::Running {
            return;
        }

        let ticked = self.session.clock().total_elapsed;
        let drift = if ticked > self.wall_elapsed {
            ticked - self.wall_elapsed
        } else {
            self.wall_elapsed - ticked
        };

        if drift > self.drift_threshold {
            warn!(
                drift_ms = drift.as_millis(),
                ticked_ms = ticked.as_millis(),
                wall_ms = self.wall_elapsed.as_millis(),
                "session time drifted from wall clock"
            );
            self.drift_warned = true;
        }
    }
}
