//! Errors at the export configuration boundary.
//!
//! The encoding paths in this crate are deliberately non-fatal: a value that
//! cannot be formatted degrades into a warning in the
//! [`DiagnosticSink`](crate::diag::DiagnosticSink) so the export can always
//! complete. Hard errors exist only where the caller's configuration itself
//! is unusable.
use std::fmt::Display;

/// Type alias for a `Result` with [`ConfigError`] as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// An error in the export configuration supplied by the caller
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates that the configured default date text could not be read as
    /// a compact `YYYYMMDD` calendar date.
    InvalidDefaultDate(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDefaultDate(text) => {
                write!(f, "'{text}' is not a valid YYYYMMDD default date")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
