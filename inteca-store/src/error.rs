//! Error types for the fallback store.

use thiserror::Error;

/// Result type for fallback store operations.
pub type FallbackResult<T> = Result<T, FallbackError>;

/// Errors that can occur in fallback store operations.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
