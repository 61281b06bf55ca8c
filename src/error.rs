//! Error types for streaks.

use thiserror::Error;

/// Errors produced by the streaks library.
#[derive(Debug, Error)]
pub enum StreaksError {
    /// SQLite failure, with the operation that failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be read, written, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A habit or completion that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller-supplied value violates a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// User input (dates, months, shells) could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<rusqlite::Error> for StreaksError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
