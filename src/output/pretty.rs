use std::time::Duration;

use colored::Colorize;

use crate::core::duration::{format_duration, format_seconds_short, render_progress_bar};
use crate::features::breath::{BreathPhase, PatternEntry, SessionOutcome, Simulation};
use crate::features::journal::{EntryOutcome, JournalEntry};

fn phase_label(phase: BreathPhase) -> colored::ColoredString {
    let name = phase.display_name();
    match phase {
        BreathPhase::Inhale => name.cyan(),
        BreathPhase::Hold | BreathPhase::HoldAfter => name.yellow(),
        BreathPhase::Exhale => name.green(),
        BreathPhase::Idle => name.dimmed(),
    }
}

fn session_length(entry: &PatternEntry) -> String {
    if entry.unbounded {
        "until stopped".to_string()
    } else {
        entry.default_minutes.map_or_else(
            || "config default".to_string(),
            |m| format_duration(Duration::from_secs(u64::from(m) * 60)),
        )
    }
}

/// Format the pattern catalog as a pretty table
#[must_use]
pub fn format_patterns_pretty(entries: &[PatternEntry]) -> String {
    if entries.is_empty() {
        return "Patterns (0)\n  No patterns".to_string();
    }

    let mut output = format!("Patterns ({})\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let marker = if entry.builtin { "•".white() } else { "+".cyan() };
        output.push_str(&format!(
            "{} {:<12} {:<12} {:<16} {}\n",
            marker,
            entry.id.bold(),
            entry.pattern.timings(),
            entry.label,
            entry.tag.dimmed()
        ));
    }

    output
}

/// Format a single pattern as pretty output
#[must_use]
pub fn format_pattern_pretty(entry: &PatternEntry) -> String {
    let pattern = &entry.pattern;
    let mut output = format!("{} {}\n", entry.label.bold(), format!("({})", entry.id).dimmed());

    if !entry.description.is_empty() {
        output.push_str(&format!("  {}\n", entry.description));
    }
    output.push_str(&format!("  {}: {}\n", "Tag".dimmed(), entry.tag));
    output.push_str(&format!("  {}: {}\n", "Timings".dimmed(), pattern.timings()));
    output.push_str(&format!(
        "  {}: {}s ({:.1} breaths/min)\n",
        "Cycle".dimmed(),
        pattern.cycle_seconds(),
        pattern.breaths_per_minute()
    ));
    output.push_str(&format!("  {}: {}\n", "Session".dimmed(), session_length(entry)));
    if entry.recommended_cycles > 0 {
        output.push_str(&format!(
            "  {}: {}\n",
            "Recommended cycles".dimmed(),
            entry.recommended_cycles
        ));
    }

    output.push_str(&format!("  {}:\n", "Phases".dimmed()));
    for phase in BreathPhase::CYCLE {
        if pattern.is_active(phase) {
            output.push_str(&format!(
                "    {:<12} {:>5}s  {}\n",
                phase_label(phase),
                pattern.seconds(phase),
                pattern.guidance_for(phase).italic()
            ));
        } else {
            output.push_str(&format!(
                "    {:<12} {}\n",
                phase.display_name().dimmed(),
                "skipped".dimmed()
            ));
        }
    }

    output
}

/// Format a simulated timeline as pretty output
#[must_use]
pub fn format_simulation_pretty(entry: &PatternEntry, simulation: &Simulation) -> String {
    let mut output = format!(
        "Timeline: {} ({})\n",
        entry.label.bold(),
        entry.pattern.timings()
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for event in &simulation.events {
        output.push_str(&format!(
            "  {:>8.1}s  {:<12} {:>3}  {}\n",
            event.at_seconds,
            phase_label(event.phase),
            format!("#{}", event.cycle + 1).dimmed(),
            event.guidance
        ));
    }

    let outcome = &simulation.outcome;
    output.push('\n');
    output.push_str(&format!(
        "{} ticks, {} full cycles, {}",
        simulation.ticks,
        outcome.cycles_completed,
        if simulation.truncated {
            "truncated".red()
        } else if outcome.completed {
            "completed".green()
        } else {
            "stopped".yellow()
        }
    ));

    output
}

/// Format a finished live session as pretty output
#[must_use]
pub fn format_outcome_pretty(
    entry: &PatternEntry,
    outcome: &SessionOutcome,
    recorded: Option<i64>,
) -> String {
    let headline = if outcome.completed {
        format!("{} Session complete", "✓".green())
    } else {
        format!("{} Session stopped", "■".yellow())
    };

    let mut output = format!("{headline}: {}\n", entry.label.bold());
    output.push_str(&format!(
        "  {}: {}",
        "Breathed".dimmed(),
        format_seconds_short(outcome.elapsed_seconds)
    ));
    if let Some(planned) = outcome.planned_seconds {
        let progress = if planned > 0.0 {
            outcome.elapsed_seconds / planned
        } else {
            1.0
        };
        output.push_str(&format!(
            " of {} {}",
            format_seconds_short(planned),
            render_progress_bar(progress, 20)
        ));
    }
    output.push('\n');
    output.push_str(&format!("  {}: {}\n", "Cycles".dimmed(), outcome.cycles_completed));

    match recorded {
        Some(id) => output.push_str(&format!("  {}\n", format!("Saved to journal (#{id})").dimmed())),
        None => output.push_str(&format!("  {}\n", "Not recorded".dimmed())),
    }

    output
}

/// Format journal entries as pretty output
#[must_use]
pub fn format_history_pretty(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "History (0 sessions)\n  No sessions recorded yet".to_string();
    }

    let mut output = format!("History ({} sessions)\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let icon = match entry.outcome {
            EntryOutcome::Completed => "✓".green(),
            EntryOutcome::Stopped => "■".yellow(),
        };
        let when = entry.started_at_local().format("%Y-%m-%d %H:%M");
        let planned = entry
            .planned_seconds
            .map_or_else(|| "open".to_string(), format_seconds_short);

        let mut line = format!(
            "{} {}  {:<12} {:>7} / {:<7} {}",
            icon,
            when.to_string().dimmed(),
            entry.pattern_id.bold(),
            format_seconds_short(entry.elapsed_seconds),
            planned,
            format!("{} cycles", entry.cycles).dimmed()
        );
        if let Some(notes) = &entry.notes {
            line.push_str(&format!("  {}", notes.italic()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}
