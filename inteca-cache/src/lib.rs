//! In-memory cache entry registry.
//!
//! Holds the most recent known-good value per cache key and answers
//! "is this fresh enough to avoid a re-fetch". The registry is never
//! authoritative: every entry is a disposable projection of the remote
//! store (or the durable fallback store), so races resolve by last write
//! wins and a dropped entry is merely a refetch.
//!
//! Staleness and eviction are separate concerns:
//! - a *stale* entry is still served while a refresh runs in the background
//!   (stale-while-revalidate), and invalidation only marks an entry stale so
//!   the last-known value stays visible during reload;
//! - an *evicted* entry is gone. Eviction is lazy — swept opportunistically
//!   on access, never on a timer — because staleness, not exact memory
//!   reclamation timing, is the correctness property that matters here.

mod entry;
mod key;
mod registry;
mod value;

pub use entry::{CacheEntry, CachePolicy, Lookup};
pub use key::CacheKey;
pub use registry::Registry;
pub use value::CachedValue;
