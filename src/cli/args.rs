use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "breathe")]
#[command(about = "Guided breathing exercises in your terminal")]
#[command(long_about = "breathe - guided breathing in your terminal

Paces inhale, hold, exhale and hold phases for a chosen breathing pattern,
shows a pulsing guide while you breathe, and keeps a journal of your
sessions.

QUICK START:
  breathe start              Breathe with the default pattern
  breathe start 4-7-8 -d 3m  Three minutes of 4-7-8 breathing
  breathe sos                Calming breaths until you stop
  breathe patterns           List available patterns

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  breathe <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a guided breathing session
    ///
    /// Opens a full-screen guide that paces each phase of the pattern.
    /// Press space to pause, r to restart, q to finish.
    ///
    /// # Examples
    ///
    ///   breathe start                  Default pattern and length
    ///   breathe start box -d 4m        Four minutes of box breathing
    ///   breathe start calm --unbounded Breathe until you stop
    ///   breathe start -n "before talk" Attach a note to the journal entry
    #[command(alias = "s")]
    Start(StartArgs),

    /// Start an SOS session
    ///
    /// Slow, grounding breaths with no time limit. Stop whenever you
    /// feel ready.
    Sos {
        /// Notes for the journal entry
        #[arg(long, short = 'n')]
        notes: Option<String>,

        /// Do not record the session in the journal
        #[arg(long)]
        no_record: bool,
    },

    /// List breathing patterns
    ///
    /// Shows built-in patterns followed by patterns from your config file.
    #[command(alias = "ls")]
    Patterns,

    /// Show details for a pattern
    ///
    /// # Examples
    ///
    ///   breathe show box
    ///   breathe show 4-7-8 -o json
    Show {
        /// Pattern id (see 'breathe patterns')
        pattern: String,
    },

    /// Preview a session's timeline without running it
    ///
    /// Drives the timer with fixed ticks and prints each phase change.
    /// Nothing is recorded.
    ///
    /// # Examples
    ///
    ///   breathe simulate box -d 16s
    ///   breathe simulate sos --cycles 3
    Simulate(SimulateArgs),

    /// View session history
    ///
    /// Shows recent sessions from the journal.
    History {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,

        /// Filter by pattern id
        #[arg(long, short = 'p')]
        pattern: Option<String>,
    },

    /// Generate a practice report
    ///
    /// Summarizes breathing time, sessions and streaks.
    Report {
        /// Period: today, week, month, all
        #[arg(long, short = 'p', default_value = "week")]
        period: String,
    },

    /// Delete all recorded sessions
    Clear {
        /// Skip the confirmation guard
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   breathe completions zsh > ~/.zsh/completions/_breathe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for a live session.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Pattern id (defaults to `session.default_pattern`)
    pub pattern: Option<String>,

    /// Session length (e.g. 90s, 5m, 1h30m, 5)
    #[arg(long, short = 'd', conflicts_with = "unbounded")]
    pub duration: Option<String>,

    /// Run until stopped
    #[arg(long, short = 'u')]
    pub unbounded: bool,

    /// Notes for the journal entry
    #[arg(long, short = 'n')]
    pub notes: Option<String>,

    /// Do not record the session in the journal
    #[arg(long)]
    pub no_record: bool,
}

/// Arguments for a headless timeline preview.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Pattern id (defaults to `session.default_pattern`)
    pub pattern: Option<String>,

    /// Session length (e.g. 90s, 5m); `0` for unbounded
    #[arg(long, short = 'd')]
    pub duration: Option<String>,

    /// Stop after this many full cycles
    #[arg(long, short = 'c')]
    pub cycles: Option<u32>,

    /// Tick interval in milliseconds (defaults to `session.tick_interval_ms`)
    #[arg(long, short = 't')]
    pub tick: Option<u64>,
}

/// Arguments for config management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
