//! The cache entry registry.

use crate::entry::{CacheEntry, CachePolicy, Lookup};
use crate::key::CacheKey;
use crate::value::CachedValue;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::watch;
use tracing::debug;

/// In-memory mapping from cache key to entry, with per-key subscriber
/// channels.
///
/// Not internally synchronized: the coordinator wraps the registry in a
/// single async mutex, mirroring the single-UI-thread discipline the cache
/// protocol assumes. Subscriber notification via `watch` is synchronous
/// with the mutating call.
pub struct Registry {
    policy: CachePolicy,
    entries: HashMap<CacheKey, CacheEntry>,
    watchers: HashMap<CacheKey, watch::Sender<Option<CachedValue>>>,
}

impl Registry {
    /// Creates an empty registry with the given freshness policy.
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            watchers: HashMap::new(),
        }
    }

    /// The policy entries are written with.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Looks up a key, reporting freshness. Bumps the entry's access time.
    pub fn read(&mut self, key: CacheKey) -> Lookup {
        self.read_at(key, Instant::now())
    }

    /// `read` with an explicit clock, for tests.
    pub fn read_at(&mut self, key: CacheKey, now: Instant) -> Lookup {
        match self.entries.get_mut(&key) {
            None => Lookup::Absent,
            Some(entry) => {
                entry.last_access = now;
                if entry.is_stale(now) {
                    Lookup::Stale(entry.value.clone())
                } else {
                    Lookup::Fresh(entry.value.clone())
                }
            }
        }
    }

    /// Returns the current value without touching freshness bookkeeping.
    #[must_use]
    pub fn peek(&self, key: CacheKey) -> Option<&CachedValue> {
        self.entries.get(&key).map(|entry| &entry.value)
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Overwrites the entry for a key and resets its fetch time.
    pub fn write(&mut self, key: CacheKey, value: CachedValue) {
        self.write_at(key, value, Instant::now());
    }

    /// `write` with an explicit clock, for tests.
    pub fn write_at(&mut self, key: CacheKey, value: CachedValue, now: Instant) {
        self.entries
            .insert(key, CacheEntry::new(value.clone(), now, self.policy));
        self.notify(key, Some(value));
    }

    /// Marks the entry stale without deleting the value, so the last-known
    /// value stays visible while a refetch is in flight.
    pub fn invalidate(&mut self, key: CacheKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.invalidated = true;
            debug!(%key, "cache entry invalidated");
        }
    }

    /// Drops the entry for a key outright.
    pub fn remove(&mut self, key: CacheKey) {
        if self.entries.remove(&key).is_some() {
            self.notify(key, None);
        }
    }

    // ── Snapshots (optimistic mutation support) ──────────────────

    /// Clones the full entry for a key, preserving freshness metadata.
    #[must_use]
    pub fn snapshot(&self, key: CacheKey) -> Option<CacheEntry> {
        self.entries.get(&key).cloned()
    }

    /// Restores a previously taken snapshot (or absence) verbatim.
    pub fn restore(&mut self, key: CacheKey, snapshot: Option<CacheEntry>) {
        match snapshot {
            Some(entry) => {
                let value = entry.value.clone();
                self.entries.insert(key, entry);
                self.notify(key, Some(value));
            }
            None => {
                self.entries.remove(&key);
                self.notify(key, None);
            }
        }
    }

    // ── Subscriptions ────────────────────────────────────────────

    /// Subscribes to a key. The receiver sees the current value immediately
    /// and every subsequent write, restore, and removal.
    pub fn subscribe(&mut self, key: CacheKey) -> watch::Receiver<Option<CachedValue>> {
        let current = self.peek(key).cloned();
        self.watchers
            .entry(key)
            .or_insert_with(|| watch::channel(current).0)
            .subscribe()
    }

    /// Number of live subscribers for a key.
    #[must_use]
    pub fn subscriber_count(&self, key: CacheKey) -> usize {
        self.watchers
            .get(&key)
            .map_or(0, |sender| sender.receiver_count())
    }

    fn notify(&mut self, key: CacheKey, value: Option<CachedValue>) {
        if let Some(sender) = self.watchers.get(&key) {
            // send_replace keeps the channel's value current even with no
            // live receivers, so a later subscriber starts in sync.
            sender.send_replace(value);
        }
    }

    // ── Eviction ─────────────────────────────────────────────────

    /// Lazily drops entries whose eviction window has elapsed with no
    /// access and no live subscribers. Called opportunistically on reads.
    pub fn sweep(&mut self) {
        self.sweep_at(Instant::now());
    }

    /// `sweep` with an explicit clock, for tests.
    pub fn sweep_at(&mut self, now: Instant) {
        let watchers = &mut self.watchers;
        self.entries.retain(|key, entry| {
            let observed = watchers
                .get(key)
                .is_some_and(|sender| sender.receiver_count() > 0);
            let keep = observed || !entry.is_evictable(now);
            if !keep {
                debug!(%key, "cache entry evicted");
            }
            keep
        });
        // Channels with no receivers and no entry serve nobody.
        watchers.retain(|key, sender| {
            sender.receiver_count() > 0 || self.entries.contains_key(key)
        });
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
