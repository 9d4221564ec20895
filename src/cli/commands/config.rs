//! Config file commands.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::BreatheError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(
    paths: &Paths,
    current: &Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match cmd {
        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&serde_json::json!({
                "config": paths.config_file,
                "database": paths.database,
                "log": paths.log_file(),
            })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },

        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(current),
            OutputFormat::Pretty => serde_yaml::to_string(current)
                .map(|s| s.trim_end().to_string())
                .map_err(|e| BreatheError::Config(format!("Failed to serialize config: {e}"))),
        },

        ConfigCommands::Init { force } => init(paths, force),
    }
}

fn init(paths: &Paths, force: bool) -> Result<String, BreatheError> {
    if paths.config_file.exists() && !force {
        return Err(BreatheError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;
    Ok(format!("Wrote {}", paths.config_file.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_init_and_show() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join("home"));

        let output = config(&paths, &Config::default(), ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap();
        assert!(output.starts_with("Wrote"));
        assert!(paths.config_file.exists());

        let loaded = Config::load_from_path(&paths.config_file).unwrap();
        assert_eq!(loaded.session.default_pattern, "box");

        let shown = config(&paths, &loaded, ConfigCommands::Show, OutputFormat::Pretty).unwrap();
        assert!(shown.contains("default_pattern: box"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();
        std::fs::write(&paths.config_file, "session:\n  default_pattern: calm\n").unwrap();

        let result = config(&paths, &Config::default(), ConfigCommands::Init { force: false }, OutputFormat::Pretty);
        assert!(matches!(result, Err(BreatheError::Config(_))));

        config(&paths, &Config::default(), ConfigCommands::Init { force: true }, OutputFormat::Pretty).unwrap();
        let loaded = Config::load_from_path(&paths.config_file).unwrap();
        assert_eq!(loaded.session.default_pattern, "box");
    }

    #[test]
    fn test_path_json() {
        let paths = Paths::with_root(std::path::PathBuf::from("/tmp/breathe-test"));
        let output = config(&paths, &Config::default(), ConfigCommands::Path, OutputFormat::Json).unwrap();
        assert!(output.contains("breathe.db"));
        assert!(output.contains("breathe.log"));
    }
}
