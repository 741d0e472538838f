//! Durable local fallback store.
//!
//! Holds the last known-good copy of every remote document in a small
//! SQLite database, keyed identically to the remote key space
//! (resource kind + locale/id). When the remote store is unreachable or
//! unconfigured, this store is the authoritative source.
//!
//! This is deliberately separate from the in-memory cache registry: the
//! registry is an ephemeral, reconstructible projection, while this store
//! survives restarts. Conflating the two would let stale cache masquerade
//! as durable truth.

mod error;
mod fallback;

pub use error::{FallbackError, FallbackResult};
pub use fallback::FallbackStore;
