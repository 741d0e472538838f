//! Error types for the remote adapter.

use inteca_store::FallbackError;
use inteca_types::{Locale, PostId, SubmissionId, ValidationError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A write operation, named for retry and telemetry when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    PutContent(Locale),
    UpsertPost(PostId),
    DeletePost(PostId),
    InsertSubmission(SubmissionId),
    UpdateSubmission(SubmissionId),
    DeleteSubmission(SubmissionId),
}

impl std::fmt::Display for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOp::PutContent(locale) => write!(f, "put content:{locale}"),
            WriteOp::UpsertPost(id) => write!(f, "upsert post {id}"),
            WriteOp::DeletePost(id) => write!(f, "delete post {id}"),
            WriteOp::InsertSubmission(id) => write!(f, "insert submission {id}"),
            WriteOp::UpdateSubmission(id) => write!(f, "update submission {id}"),
            WriteOp::DeleteSubmission(id) => write!(f, "delete submission {id}"),
        }
    }
}

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport or configuration failure reaching the remote store.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Logical absence of a keyed document.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote store rejected the request.
    #[error("remote store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A write failed mid-flight; carries the attempted operation.
    #[error("remote write failed ({op}): {source}")]
    RemoteWrite {
        op: WriteOp,
        #[source]
        source: Box<StoreError>,
    },

    /// A remote row did not decode into the typed schema.
    #[error("invalid remote record: {0}")]
    InvalidRecord(String),

    /// Caller-side validation failure; no store call was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local fallback store failure.
    #[error("fallback store error: {0}")]
    Fallback(#[from] FallbackError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Wraps a write-path failure with the operation that attempted it.
    #[must_use]
    pub fn write(op: WriteOp, source: StoreError) -> Self {
        StoreError::RemoteWrite {
            op,
            source: Box::new(source),
        }
    }

    /// True for failures where retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::RemoteUnavailable(_) => true,
            StoreError::RemoteWrite { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}
