//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::core::duration::format_mmss;
use crate::features::breath::pattern::seconds_to_duration;
use crate::features::breath::{pulse, BreathPhase, SessionStatus};
use crate::tui::app::App;

const HELP: &str = "space:pause | r:restart | q:finish";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, pulse, guidance, gauges, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Pulse
            Constraint::Length(3), // Guidance
            Constraint::Length(3), // Phase gauge
            Constraint::Length(3), // Session gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_pulse(frame, app, chunks[1]);
    render_guidance(frame, app, chunks[2]);
    render_phase_gauge(frame, app, chunks[3]);
    render_session_gauge(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

fn phase_rgb(phase: BreathPhase) -> (u8, u8, u8) {
    match phase {
        BreathPhase::Inhale => (80, 200, 255),
        BreathPhase::Hold | BreathPhase::HoldAfter => (255, 200, 90),
        BreathPhase::Exhale => (110, 230, 150),
        BreathPhase::Idle => (120, 120, 120),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn phase_color(phase: BreathPhase, intensity: f64) -> Color {
    let (r, g, b) = phase_rgb(phase);
    let k = 0.35 + 0.65 * intensity.clamp(0.0, 1.0);
    let scale = |c: u8| (f64::from(c) * k).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(" {} ({}) ", app.label, app.timings);

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Rectangle of `scale` times the area's size, centered in it.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn centered_rect(area: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = ((f64::from(area.width) * scale).round() as u16).clamp(2.min(area.width), area.width);
    let height = ((f64::from(area.height) * scale).round() as u16).clamp(2.min(area.height), area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the breathing shape, sized by the pulse scale.
fn render_pulse(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let params = pulse(snapshot);
    let color = phase_color(snapshot.phase, params.intensity);

    let shape = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(color))
        .title(Line::from(format!(" {} ", snapshot.phase.display_name())).alignment(Alignment::Center));

    frame.render_widget(shape, centered_rect(area, params.scale));
}

/// Render the guidance text.
fn render_guidance(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = match app.session_status() {
        SessionStatus::Completed => "Well done.".to_string(),
        SessionStatus::Idle => "Get ready...".to_string(),
        SessionStatus::Running | SessionStatus::Paused => app.snapshot.guidance.clone(),
    };

    let guidance = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));

    frame.render_widget(guidance, area);
}

/// Render progress through the current phase.
fn render_phase_gauge(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let label = format!(
        "{} {:.1}s",
        snapshot.phase.display_name(),
        snapshot.phase_elapsed_seconds
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Phase "))
        .gauge_style(Style::default().fg(phase_color(snapshot.phase, 1.0)))
        .ratio(snapshot.phase_progress.clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}

/// Render progress through the session, or elapsed time when unbounded.
fn render_session_gauge(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let elapsed = format_mmss(seconds_to_duration(snapshot.total_elapsed_seconds));
    let cycles = format!(
        "{} cycle{}",
        snapshot.cycles_completed,
        if snapshot.cycles_completed == 1 { "" } else { "s" }
    );
    let block = Block::default().borders(Borders::ALL).title(" Session ");

    match (app.session_progress(), snapshot.remaining_seconds) {
        (Some(progress), Some(remaining)) => {
            let remaining = format_mmss(seconds_to_duration(remaining));
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(Color::Magenta))
                .ratio(progress.clamp(0.0, 1.0))
                .label(format!("{elapsed} | {remaining} left | {cycles}"));
            frame.render_widget(gauge, area);
        }
        _ => {
            let text = Paragraph::new(format!("{elapsed} elapsed | {cycles} | until stopped"))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
    }
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::SessionConfig;
    use crate::features::breath::{BreathPattern, BreathSession};
    use crate::tui::event::Action;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(total: Duration) -> (App, Instant) {
        let pattern = BreathPattern::new(4.0, 0.0, 6.0, 0.0).unwrap();
        let session = BreathSession::start(pattern, total).unwrap();
        let now = Instant::now();
        (
            App::new(session, "Balance", "4-0-6-0", &SessionConfig::default(), now),
            now,
        )
    }

    #[test]
    fn test_render_running_session() {
        let (mut app, start) = app(Duration::from_secs(60));
        app.on_interval(start + Duration::from_secs(1));

        let text = screen(&app);
        assert!(text.contains("Balance (4-0-6-0)"));
        assert!(text.contains("Breathe in..."));
        assert!(text.contains("Inhale"));
        assert!(text.contains("left"));
        assert!(text.contains("space:pause"));
    }

    #[test]
    fn test_render_unbounded_session() {
        let (app, _) = app(Duration::ZERO);
        let text = screen(&app);
        assert!(text.contains("until stopped"));
    }

    #[test]
    fn test_render_paused_status() {
        let (mut app, start) = app(Duration::from_secs(60));
        app.apply(Action::TogglePause, start);
        assert!(screen(&app).contains("Paused"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        let full = centered_rect(area, 1.0);
        assert_eq!(full, area);

        let half = centered_rect(area, 0.5);
        assert_eq!(half, Rect::new(10, 5, 20, 10));

        let tiny = centered_rect(Rect::new(0, 0, 1, 1), 0.5);
        assert_eq!(tiny.width, 1);
    }
}
