use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use breathe::cli::args::{Cli, Commands};
use breathe::cli::commands;
use breathe::config::{Config, Paths};
use breathe::error::BreatheError;
use breathe::features::journal::JournalStorage;
use breathe::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        let code = e
            .downcast_ref::<BreatheError>()
            .map_or(1, BreatheError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    logging::init(&paths);

    // A broken config file must not block `config path` or `config init`.
    let config = match Config::load_from_path(&paths.config_file) {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Commands::Config(_)) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Start(args) => commands::start(&config, args, format)?,
        Commands::Sos { notes, no_record } => commands::sos(&config, notes, no_record, format)?,
        Commands::Patterns => commands::patterns(&config, format)?,
        Commands::Show { pattern } => commands::show(&config, &pattern, format)?,
        Commands::Simulate(args) => commands::simulate_timeline(&config, &args, format)?,
        Commands::History { limit, pattern } => {
            commands::history(&JournalStorage::new()?, limit, pattern.as_deref(), format)?
        }
        Commands::Report { period } => commands::report(&JournalStorage::new()?, &period, format)?,
        Commands::Clear { force } => commands::clear(&JournalStorage::new()?, force, format)?,
        Commands::Config(args) => commands::config(&paths, &config, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
