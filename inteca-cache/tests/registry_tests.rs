use inteca_cache::{CacheKey, CachePolicy, CachedValue, Lookup, Registry};
use inteca_types::{ContentDocument, Locale};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn policy() -> CachePolicy {
    CachePolicy::new(Duration::from_secs(60), Duration::from_secs(300))
}

fn content_value(locale: Locale) -> CachedValue {
    CachedValue::Content(ContentDocument::seeded(locale))
}

// ── Read/write ───────────────────────────────────────────────────

#[test]
fn absent_key_reads_absent() {
    let mut registry = Registry::new(policy());
    assert!(matches!(
        registry.read(CacheKey::Content(Locale::Ru)),
        Lookup::Absent
    ));
}

#[test]
fn fresh_write_reads_fresh() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Ru);
    registry.write(key, content_value(Locale::Ru));

    let lookup = registry.read(key);
    assert!(!lookup.is_stale());
    assert!(lookup.value().is_some());
}

#[test]
fn entry_goes_stale_after_window() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::En);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::En), t0);

    let before = registry.read_at(key, t0 + Duration::from_secs(59));
    assert!(!before.is_stale());

    let after = registry.read_at(key, t0 + Duration::from_secs(61));
    assert!(after.is_stale());
    // The stale value is still served.
    assert!(after.value().is_some());
}

#[test]
fn rewrite_resets_fetch_time() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Kz);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::Kz), t0);
    registry.write_at(key, content_value(Locale::Kz), t0 + Duration::from_secs(120));

    let lookup = registry.read_at(key, t0 + Duration::from_secs(150));
    assert!(!lookup.is_stale());
}

#[test]
fn locales_have_independent_entries() {
    let mut registry = Registry::new(policy());
    registry.write(CacheKey::Content(Locale::Ru), content_value(Locale::Ru));

    assert!(matches!(
        registry.read(CacheKey::Content(Locale::En)),
        Lookup::Absent
    ));
    assert!(registry.peek(CacheKey::Content(Locale::Ru)).is_some());
}

// ── Invalidation ─────────────────────────────────────────────────

#[test]
fn invalidate_marks_stale_but_keeps_value() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Posts(Locale::Ru);
    registry.write(key, CachedValue::Posts(Vec::new()));
    registry.invalidate(key);

    let lookup = registry.read(key);
    assert!(lookup.is_stale());
    assert!(lookup.value().is_some());
}

#[test]
fn invalidate_missing_key_is_noop() {
    let mut registry = Registry::new(policy());
    registry.invalidate(CacheKey::Submissions); // should not panic
    assert!(registry.is_empty());
}

#[test]
fn write_clears_invalidation() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Submissions;
    registry.write(key, CachedValue::Submissions(Vec::new()));
    registry.invalidate(key);
    registry.write(key, CachedValue::Submissions(Vec::new()));

    assert!(!registry.read(key).is_stale());
}

// ── Snapshots ────────────────────────────────────────────────────

#[test]
fn restore_returns_exact_prior_state() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Ru);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::Ru), t0);

    let snapshot = registry.snapshot(key);
    registry.write_at(key, content_value(Locale::En), t0 + Duration::from_secs(30));
    registry.restore(key, snapshot);

    let value = registry.peek(key).unwrap();
    assert_eq!(
        value.as_content().unwrap().locale,
        Locale::Ru
    );
    // The restored entry keeps its original fetch time, so it goes stale
    // on the original schedule.
    assert!(registry.read_at(key, t0 + Duration::from_secs(61)).is_stale());
}

#[test]
fn restoring_absence_removes_entry() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Posts(Locale::En);
    let snapshot = registry.snapshot(key);
    assert!(snapshot.is_none());

    registry.write(key, CachedValue::Posts(Vec::new()));
    registry.restore(key, snapshot);
    assert!(matches!(registry.read(key), Lookup::Absent));
}

// ── Subscriptions ────────────────────────────────────────────────

#[tokio::test]
async fn subscribers_observe_writes_synchronously() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Ru);
    let mut rx = registry.subscribe(key);
    assert!(rx.borrow().is_none());

    registry.write(key, content_value(Locale::Ru));
    // No await needed: watch delivery is synchronous with the write.
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_some());
}

#[tokio::test]
async fn subscriber_sees_current_value_on_subscribe() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Submissions;
    registry.write(key, CachedValue::Submissions(Vec::new()));

    let rx = registry.subscribe(key);
    assert!(rx.borrow().is_some());
}

#[tokio::test]
async fn removal_notifies_with_none() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Posts(Locale::Kz);
    registry.write(key, CachedValue::Posts(Vec::new()));
    let mut rx = registry.subscribe(key);
    rx.borrow_and_update();

    registry.remove(key);
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());
}

// ── Eviction ─────────────────────────────────────────────────────

#[test]
fn sweep_drops_unobserved_expired_entries() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Ru);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::Ru), t0);

    registry.sweep_at(t0 + Duration::from_secs(299));
    assert_eq!(registry.len(), 1);

    registry.sweep_at(t0 + Duration::from_secs(301));
    assert!(registry.is_empty());
}

#[test]
fn access_defers_eviction() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::En);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::En), t0);

    // Touch the entry halfway through the window.
    registry.read_at(key, t0 + Duration::from_secs(200));
    registry.sweep_at(t0 + Duration::from_secs(400));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn live_subscriber_blocks_eviction() {
    let mut registry = Registry::new(policy());
    let key = CacheKey::Content(Locale::Kz);
    let t0 = Instant::now();
    registry.write_at(key, content_value(Locale::Kz), t0);
    let rx = registry.subscribe(key);

    registry.sweep_at(t0 + Duration::from_secs(1000));
    assert_eq!(registry.len(), 1);

    drop(rx);
    registry.sweep_at(t0 + Duration::from_secs(1000));
    assert!(registry.is_empty());
}

#[test]
fn policy_widens_eviction_window_to_staleness() {
    let policy = CachePolicy::new(Duration::from_secs(100), Duration::from_secs(10));
    assert_eq!(policy.evict_after, Duration::from_secs(100));
}
