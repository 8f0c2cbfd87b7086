//! Error types for time-block planning.
//!
//! Infeasibility and solver timeouts are not errors: they are named
//! outcomes of a plan (see [`crate::planner::PlanOutcome`]).

use thiserror::Error;

/// Main error type for compile, parse, and extraction failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid global bounds, or a request that cannot be satisfied
    /// even when considered alone.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed input record.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based input line.
        line: usize,
        /// What could not be parsed.
        message: String,
    },

    /// The solver backend returned values that do not decode into a
    /// schedule honoring the hard constraints.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O error while reading input or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Error::Backend(message.into())
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::config("max_slots must be positive").to_string(),
            "configuration error: max_slots must be positive"
        );
        assert_eq!(
            Error::parse(3, "bad fieldname '9x'").to_string(),
            "parse error on line 3: bad fieldname '9x'"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
