//! Synchronization coordinator.
//!
//! Mediates between UI components and the content store: reads go through
//! the cache registry with stale-while-revalidate semantics and
//! single-flight de-duplication; mutations follow the optimistic protocol
//! (apply locally, commit remotely, reconcile or roll back).
//!
//! One [`Coordinator`] is constructed per application root and threaded to
//! the UI binding layer as an explicit handle. There is no ambient global
//! state; cloning the handle shares the same registry and store.

mod config;
mod coordinator;
mod error;
mod retry;

pub use config::{RetryPolicy, SyncConfig};
pub use coordinator::Coordinator;
pub use error::{SyncError, SyncResult};

// UI-facing subscription types come from the cache crate.
pub use inteca_cache::{CacheKey, CachedValue};
