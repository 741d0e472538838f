//! Error types for the coordinator.

use inteca_remote::StoreError;
use inteca_types::ValidationError;
use thiserror::Error;

/// Result type for coordinator operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced to the UI binding layer.
///
/// Read paths never produce these: failed reads degrade to fallback or
/// seeded data inside the adapter. Every `SyncError` therefore belongs to
/// a write the user initiated, and arrives together with a rolled-back
/// registry state.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The store rejected or failed the write; the registry was rolled
    /// back (unless a newer mutation superseded this one).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Caller-side validation failed; nothing was applied or sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
