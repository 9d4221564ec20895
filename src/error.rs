//! Error types for breathe.

use thiserror::Error;

/// Errors produced by the breathe library.
#[derive(Debug, Error)]
pub enum BreatheError {
    /// A breathing pattern failed validation.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A duration string could not be understood.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Configuration could not be loaded, saved, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BreatheError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPattern(_) | Self::InvalidDuration(_) => 2,
            Self::NotFound(_) => 3,
            Self::Config(_) => 4,
            Self::Database(_) | Self::Io(_) | Self::Parse(_) | Self::Terminal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BreatheError::InvalidPattern("all phase durations are zero".to_string());
        assert_eq!(err.to_string(), "Invalid pattern: all phase durations are zero");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BreatheError::InvalidDuration("x".into()).exit_code(), 2);
        assert_eq!(BreatheError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(BreatheError::Config("x".into()).exit_code(), 4);
        assert_eq!(BreatheError::Database("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BreatheError = io.into();
        assert!(matches!(err, BreatheError::Io(_)));
    }
}
