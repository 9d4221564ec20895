//! Terminal User Interface (TUI) for breathe.
//!
//! Hosts a live breathing session: drives the session clock with fixed
//! ticks and renders the pulse, guidance and progress.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, MAX_CATCH_UP_TICKS};
pub use event::{action_for_key, Action};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::BreatheError;
use crate::features::breath::{BreathSession, PatternEntry, SessionOutcome};

/// Run a live session until it is stopped.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn.
pub fn run_session(
    session: BreathSession,
    entry: &PatternEntry,
    config: &SessionConfig,
) -> Result<SessionOutcome, BreatheError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreatheError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreatheError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreatheError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(
        session,
        &entry.label,
        &entry.pattern.timings(),
        config,
        Instant::now(),
    );
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result?;
    Ok(app.into_outcome())
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), BreatheError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreatheError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.time_until_tick(Instant::now());
        if let Some(action) = event::handle_events(timeout)? {
            debug!(?action, "key action");
            app.apply(action, Instant::now());
        }
        app.on_interval(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}
