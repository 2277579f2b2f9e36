//! Error types for tour listings and calendar exports.

use thiserror::Error;

/// Errors that can occur while building listings or exporting calendar files.
///
/// An empty filter result is not an error; it renders as a placeholder.
#[derive(Error, Debug)]
pub enum TourError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown filter '{0}'. Available: all, uk, eu")]
    UnknownFilter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tour operations.
pub type TourResult<T> = Result<T, TourError>;
