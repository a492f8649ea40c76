//! Error types for lifegrid.

use thiserror::Error;

/// Errors raised by the simulation core and its configuration layer.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Evaluation region with a negative extent.
    #[error("invalid bounds: width {width}, height {height}")]
    InvalidBounds {
        /// Width as supplied by the caller.
        width: i32,
        /// Height as supplied by the caller.
        height: i32,
    },

    /// Stamp requested with a template that has no cells.
    #[error("pattern '{name}' has no cells")]
    EmptyPattern {
        /// Name of the offending template.
        name: String,
    },

    /// Stamp requested with no template at all.
    #[error("no pattern selected")]
    MissingTemplate,

    /// Pattern name not present in the library.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Key binding string that cannot be parsed.
    #[error("invalid key binding: {0}")]
    InvalidKey(String),

    /// Color string that is not `#rrggbb`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Time value in seconds that does not fit a `Duration`.
    #[error("invalid duration: {0} seconds")]
    InvalidDuration(f32),

    /// Log level name not understood by `log`.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("pattern file: {0}")]
    Json(#[from] serde_json::Error),
}

impl LifeError {
    /// Misuse that is reported and skipped rather than aborting the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LifeError::EmptyPattern { .. } | LifeError::MissingTemplate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_errors_are_recoverable() {
        assert!(LifeError::MissingTemplate.is_recoverable());
        assert!(LifeError::EmptyPattern { name: "x".into() }.is_recoverable());
        assert!(!LifeError::InvalidBounds { width: -1, height: 0 }.is_recoverable());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = LifeError::EmptyPattern { name: "glider".into() };
        assert_eq!(err.to_string(), "pattern 'glider' has no cells");
        let err = LifeError::InvalidBounds { width: -2, height: 3 };
        assert_eq!(err.to_string(), "invalid bounds: width -2, height 3");
    }
}
