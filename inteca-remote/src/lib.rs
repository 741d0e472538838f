//! Remote store adapter.
//!
//! Translates logical content operations into calls against the hosted
//! table API, with a deterministic local fallback:
//! - reads absorb remote failures (degraded data beats a hard failure for
//!   content rendering) and never raise past this boundary;
//! - writes always surface failures to the caller, carrying the attempted
//!   operation for retry and telemetry.
//!
//! [`RemoteStore`] is the provider abstraction, [`RestStore`] the hosted
//! REST implementation, and [`ContentStore`] the adapter the coordinator
//! talks to — it decides between remote, fallback, and seeded defaults.

mod content_store;
mod error;
mod rest;
mod store;

pub use content_store::ContentStore;
pub use error::{StoreError, StoreResult, WriteOp};
pub use rest::{RemoteConfig, RestStore};
pub use store::RemoteStore;
