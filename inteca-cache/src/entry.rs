//! Cache entries and freshness policy.

use crate::value::CachedValue;
use std::time::{Duration, Instant};

/// Freshness windows applied to every entry at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long after a fetch an entry is served without a refetch.
    pub stale_after: Duration,
    /// How long after the last access an unobserved entry may be dropped.
    pub evict_after: Duration,
}

impl CachePolicy {
    /// Creates a policy, upholding the `stale_after <= evict_after`
    /// invariant by widening the eviction window if needed.
    #[must_use]
    pub fn new(stale_after: Duration, evict_after: Duration) -> Self {
        Self {
            stale_after,
            evict_after: evict_after.max(stale_after),
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60),
            evict_after: Duration::from_secs(300),
        }
    }
}

/// One cached value with its freshness metadata.
///
/// Opaque outside the registry: the coordinator holds cloned entries as
/// rollback snapshots and hands them back verbatim, so a restored entry
/// keeps its original fetch time and staleness.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub(crate) value: CachedValue,
    pub(crate) fetched_at: Instant,
    pub(crate) last_access: Instant,
    pub(crate) stale_after: Duration,
    pub(crate) evict_after: Duration,
    pub(crate) invalidated: bool,
}

impl CacheEntry {
    pub(crate) fn new(value: CachedValue, now: Instant, policy: CachePolicy) -> Self {
        Self {
            value,
            fetched_at: now,
            last_access: now,
            stale_after: policy.stale_after,
            evict_after: policy.evict_after,
            invalidated: false,
        }
    }

    /// The cached value.
    #[must_use]
    pub fn value(&self) -> &CachedValue {
        &self.value
    }

    /// True once the entry needs a background refetch.
    #[must_use]
    pub fn is_stale(&self, now: Instant) -> bool {
        self.invalidated || now.duration_since(self.fetched_at) > self.stale_after
    }

    pub(crate) fn is_evictable(&self, now: Instant) -> bool {
        now.duration_since(self.last_access) > self.evict_after
    }
}

/// Result of a registry read.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// No entry for the key; the caller must fetch.
    Absent,
    /// A fresh value; serve it as is.
    Fresh(CachedValue),
    /// A stale value; serve it, then refetch in the background.
    Stale(CachedValue),
}

impl Lookup {
    /// The value, fresh or stale.
    #[must_use]
    pub fn value(&self) -> Option<&CachedValue> {
        match self {
            Lookup::Absent => None,
            Lookup::Fresh(v) | Lookup::Stale(v) => Some(v),
        }
    }

    /// True for a stale hit.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Lookup::Stale(_))
    }
}
