//! Pattern catalog commands.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::BreatheError;
use crate::features::breath::catalog;
use crate::output::{format_pattern, format_patterns};

/// Execute the patterns command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn patterns(config: &Config, format: OutputFormat) -> Result<String, BreatheError> {
    format_patterns(&catalog::all(&config.patterns), format)
}

/// Execute the show command.
///
/// # Errors
///
/// Returns `BreatheError::NotFound` if the pattern does not exist.
pub fn show(config: &Config, id: &str, format: OutputFormat) -> Result<String, BreatheError> {
    let entry = catalog::find(id, &config.patterns)?;
    format_pattern(&entry, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_lists_custom() {
        let yaml = "patterns:\n  - id: square\n    inhale: 3\n    hold: 3\n    exhale: 3\n    hold_after: 3\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        let output = patterns(&config, OutputFormat::Json).unwrap();
        assert!(output.contains("\"id\": \"square\""));
        assert!(output.contains("\"builtin\": false"));
    }

    #[test]
    fn test_show_unknown() {
        let config = Config::default();
        assert!(matches!(
            show(&config, "missing", OutputFormat::Pretty),
            Err(BreatheError::NotFound(_))
        ));
    }
}
