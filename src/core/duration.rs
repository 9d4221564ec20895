//! Duration parsing and formatting.
//!
//! Accepts strings like `90s`, `5m`, `1h30m`, or a bare number of minutes.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BreatheError;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<h>\d+)\s*h)?\s*(?:(?P<m>\d+)\s*m)?\s*(?:(?P<s>\d+)\s*s)?$")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Parse a duration string like "25m", "1h30m", "90s". A bare number is
/// minutes. `0` is accepted and means unbounded where the caller allows it.
///
/// # Errors
///
/// Returns `BreatheError::InvalidDuration` if the string is empty, not in
/// one of the accepted forms, or too large to represent in seconds.
pub fn parse_duration(s: &str) -> Result<Duration, BreatheError> {
    let s = s.trim().to_lowercase();
    let invalid = || BreatheError::InvalidDuration(format!("'{s}' (try 90s, 5m or 1h30m)"));

    if s.is_empty() {
        return Err(invalid());
    }

    if let Ok(minutes) = s.parse::<u64>() {
        return minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(invalid);
    }

    let caps = DURATION_PATTERN.captures(&s).ok_or_else(invalid)?;
    let part = |name: &str, unit: u64| -> Result<u64, BreatheError> {
        caps.name(name).map_or(Ok(0), |m| {
            m.as_str()
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_mul(unit))
                .ok_or_else(invalid)
        })
    };

    if caps.name("h").is_none() && caps.name("m").is_none() && caps.name("s").is_none() {
        return Err(invalid());
    }

    let (hours, minutes, seconds) = (part("h", 3600)?, part("m", 60)?, part("s", 1)?);
    hours
        .checked_add(minutes)
        .and_then(|total| total.checked_add(seconds))
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

/// Format a duration as MM:SS (hours roll into minutes).
#[must_use]
pub fn format_mmss(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let plural = |n: u64| if n == 1 { "" } else { "s" };

    if total_seconds < 60 {
        return format!("{} second{}", total_seconds, plural(total_seconds));
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{hours} hour{}, {minutes} minute{}", plural(hours), plural(minutes))
        } else {
            format!("{hours} hour{}", plural(hours))
        }
    } else if seconds > 0 {
        format!("{minutes} minute{}, {seconds} second{}", plural(minutes), plural(seconds))
    } else {
        format!("{minutes} minute{}", plural(minutes))
    }
}

/// Format a number of seconds as a short string (e.g. "45s", "5m", "1h 30m").
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_seconds_short(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{total}s")
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration(" 5M ").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn test_parse_duration_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_rejected() {
        assert!(matches!(
            parse_duration("307445734561825861"),
            Err(BreatheError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("5124095576030432h"),
            Err(BreatheError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("5124095576030431h59m59s"),
            Err(BreatheError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("99999999999999999999s"),
            Err(BreatheError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(45)), "45 seconds");
        assert_eq!(format_duration(Duration::from_secs(60)), "1 minute");
        assert_eq!(format_duration(Duration::from_secs(90)), "1 minute, 30 seconds");
        assert_eq!(format_duration(Duration::from_secs(7200)), "2 hours");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1 hour, 30 minutes");
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(Duration::from_secs(300)), "05:00");
        assert_eq!(format_mmss(Duration::from_secs(90)), "01:30");
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
    }

    #[test]
    fn test_format_seconds_short() {
        assert_eq!(format_seconds_short(44.6), "45s");
        assert_eq!(format_seconds_short(300.0), "5m");
        assert_eq!(format_seconds_short(5400.0), "1h 30m");
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
