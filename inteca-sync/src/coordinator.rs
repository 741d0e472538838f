//! The synchronization coordinator.
//!
//! All registry state lives behind one async mutex, mirroring the
//! single-UI-thread discipline the cache protocol assumes: every state
//! change is a short critical section, and remote calls are awaited
//! outside the lock.
//!
//! A mutation runs the three-phase protocol:
//! 1. *Apply* — snapshot the current entries, write the optimistically
//!    patched value, and issue a per-key sequence number. Subscribers see
//!    the new value synchronously.
//! 2. *Commit* — send the write through the content store (with the
//!    configured retry budget).
//! 3. *Reconcile or roll back* — on success, invalidate the touched keys
//!    so the next read refetches authoritative data; on failure, restore
//!    the snapshots and surface the error. Either way, a mutation only
//!    touches the registry if it is still the latest issued for its key:
//!    a superseded mutation discards its own effect (last-issued-wins).

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::retry;
use inteca_cache::{CacheEntry, CacheKey, CachedValue, Lookup, Registry};
use inteca_remote::{ContentStore, StoreResult};
use inteca_types::{
    BlogPost, ContactForm, ContactSubmission, ContentDocument, ContentPatch, Locale, PostId,
    SubmissionId, SubmissionStatus,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::debug;

/// Client-side coordinator between UI components and the content store.
///
/// Cheap to clone; clones share the same registry and store. Construct one
/// per application root and pass it down explicitly.
#[derive(Clone)]
pub struct Coordinator {
    store: Arc<ContentStore>,
    state: Arc<Mutex<State>>,
    config: SyncConfig,
}

struct State {
    registry: Registry,
    ledger: MutationLedger,
    /// In-flight fetches, for single-flight de-duplication. The sender
    /// side lives with the leading fetcher; followers hold a receiver.
    fetches: HashMap<CacheKey, watch::Receiver<bool>>,
}

/// Per-key mutation sequence numbers.
///
/// `issue` hands out the next number and marks it the latest outstanding;
/// a settling mutation compares against the latest to decide whether it
/// may still touch the registry.
#[derive(Default)]
struct MutationLedger {
    next_seq: HashMap<CacheKey, u64>,
    latest: HashMap<CacheKey, u64>,
}

impl MutationLedger {
    fn issue(&mut self, key: CacheKey) -> u64 {
        let seq = self.next_seq.entry(key).or_insert(0);
        *seq += 1;
        self.latest.insert(key, *seq);
        *seq
    }

    fn is_latest(&self, key: CacheKey, seq: u64) -> bool {
        self.latest.get(&key) == Some(&seq)
    }

    fn settle(&mut self, key: CacheKey, seq: u64) {
        if self.is_latest(key, seq) {
            self.latest.remove(&key);
        }
    }
}

struct MutationTicket {
    primary: CacheKey,
    seq: u64,
    snapshots: Vec<(CacheKey, Option<CacheEntry>)>,
}

enum Waiter {
    Lead(watch::Sender<bool>),
    Follow(watch::Receiver<bool>),
}

impl Coordinator {
    /// Creates a coordinator over a content store.
    #[must_use]
    pub fn new(store: Arc<ContentStore>, config: SyncConfig) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(State {
                registry: Registry::new(config.cache),
                ledger: MutationLedger::default(),
                fetches: HashMap::new(),
            })),
            config,
        }
    }

    /// The configuration this coordinator runs with.
    #[must_use]
    pub fn config(&self) -> SyncConfig {
        self.config
    }

    // ── Reads (stale-while-revalidate) ───────────────────────────

    /// The content document for a locale.
    pub async fn content(&self, locale: Locale) -> ContentDocument {
        match self.read_key(CacheKey::Content(locale)).await {
            CachedValue::Content(doc) => doc,
            // Key/value pairing is kept by construction; this arm is for
            // totality only.
            _ => ContentDocument::seeded(locale),
        }
    }

    /// All posts for a locale, drafts included (admin surface).
    pub async fn posts(&self, locale: Locale) -> Vec<BlogPost> {
        match self.read_key(CacheKey::Posts(locale)).await {
            CachedValue::Posts(posts) => posts,
            _ => Vec::new(),
        }
    }

    /// Published posts for a locale (public surface).
    pub async fn published_posts(&self, locale: Locale) -> Vec<BlogPost> {
        let mut posts = self.posts(locale).await;
        posts.retain(|p| p.published);
        posts
    }

    /// A single post out of the locale's list.
    pub async fn post(&self, locale: Locale, id: PostId) -> Option<BlogPost> {
        self.posts(locale).await.into_iter().find(|p| p.id == id)
    }

    /// The submission inbox (admin surface).
    pub async fn submissions(&self) -> Vec<ContactSubmission> {
        match self.read_key(CacheKey::Submissions).await {
            CachedValue::Submissions(subs) => subs,
            _ => Vec::new(),
        }
    }

    /// Marks a key stale, forcing the next read to refetch while the
    /// last-known value stays visible.
    pub async fn invalidate(&self, key: CacheKey) {
        self.state.lock().await.registry.invalidate(key);
    }

    /// Subscribes to a key: the receiver sees the current value and every
    /// optimistic apply, rollback, reconciling write, and removal.
    pub async fn subscribe(&self, key: CacheKey) -> watch::Receiver<Option<CachedValue>> {
        self.state.lock().await.registry.subscribe(key)
    }

    // ── Content mutations ────────────────────────────────────────

    /// Merges a patch into a locale's content document.
    pub async fn update_content(&self, locale: Locale, patch: ContentPatch) -> SyncResult<()> {
        let key = CacheKey::Content(locale);
        // Make sure an entry exists so sequential edits compose on the
        // latest (possibly already-optimistic) value.
        let current = self.content(locale).await;
        let store = self.store.clone();
        let commit_patch = patch.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| {
                let base = registry
                    .peek(key)
                    .and_then(|v| v.as_content())
                    .cloned()
                    .unwrap_or_else(|| current.clone());
                vec![(key, CachedValue::Content(base.merged(&patch)))]
            },
            move || {
                let store = store.clone();
                let patch = commit_patch.clone();
                async move { store.merge_content(locale, &patch).await.map(|_| ()) }
            },
        )
        .await
    }

    /// Resets a locale's content document to the seeded default.
    pub async fn reset_content(&self, locale: Locale) -> SyncResult<()> {
        let key = CacheKey::Content(locale);
        let seeded = ContentDocument::seeded(locale);
        let store = self.store.clone();
        let commit_doc = seeded.clone();
        self.run_mutation(
            key,
            &[key],
            |_| vec![(key, CachedValue::Content(seeded.clone()))],
            move || {
                let store = store.clone();
                let doc = commit_doc.clone();
                async move { store.put_content(&doc).await }
            },
        )
        .await
    }

    // ── Blog mutations ───────────────────────────────────────────

    /// Creates a new post (or republishes an edited one).
    pub async fn create_post(&self, post: BlogPost) -> SyncResult<()> {
        self.upsert_post(post).await
    }

    /// Updates an existing post by id.
    pub async fn update_post(&self, post: BlogPost) -> SyncResult<()> {
        self.upsert_post(post).await
    }

    async fn upsert_post(&self, post: BlogPost) -> SyncResult<()> {
        post.validate()?;
        let key = CacheKey::Posts(post.locale);
        let store = self.store.clone();
        let commit_post = post.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| match registry.peek(key).and_then(|v| v.as_posts()) {
                Some(posts) => {
                    let mut list = posts.to_vec();
                    place_post(&mut list, post.clone());
                    vec![(key, CachedValue::Posts(list))]
                }
                // Nothing cached to patch optimistically; the reconcile
                // fetch will bring the list in.
                None => Vec::new(),
            },
            move || {
                let store = store.clone();
                let post = commit_post.clone();
                async move { store.upsert_post(&post).await }
            },
        )
        .await
    }

    /// Deletes a post: optimistically removed from the cached list,
    /// reinserted on rollback (position best-effort via date ordering).
    pub async fn delete_post(&self, locale: Locale, id: PostId) -> SyncResult<()> {
        let key = CacheKey::Posts(locale);
        let store = self.store.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| match registry.peek(key).and_then(|v| v.as_posts()) {
                Some(posts) => {
                    let mut list = posts.to_vec();
                    list.retain(|p| p.id != id);
                    vec![(key, CachedValue::Posts(list))]
                }
                None => Vec::new(),
            },
            move || {
                let store = store.clone();
                async move { store.delete_post(locale, id).await }
            },
        )
        .await
    }

    // ── Submission mutations ─────────────────────────────────────

    /// Submits a contact form (public surface). Validates before any store
    /// call; the stored submission always starts with status `new`.
    pub async fn submit_contact(&self, form: ContactForm) -> SyncResult<ContactSubmission> {
        form.validate()?;
        let submission = ContactSubmission::from_form(form);
        let key = CacheKey::Submissions;
        let store = self.store.clone();
        let commit_sub = submission.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| match registry.peek(key).and_then(|v| v.as_submissions()) {
                Some(subs) => {
                    let mut list = subs.to_vec();
                    list.insert(0, submission.clone());
                    vec![(key, CachedValue::Submissions(list))]
                }
                // The public surface rarely has the admin inbox cached.
                None => Vec::new(),
            },
            move || {
                let store = store.clone();
                let sub = commit_sub.clone();
                async move { store.insert_submission(&sub).await }
            },
        )
        .await?;
        Ok(submission)
    }

    /// Changes a submission's status (admin surface).
    pub async fn set_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> SyncResult<()> {
        let key = CacheKey::Submissions;
        let store = self.store.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| match registry.peek(key).and_then(|v| v.as_submissions()) {
                Some(subs) => {
                    let list = subs
                        .iter()
                        .map(|s| {
                            if s.id == id {
                                s.with_status(status)
                            } else {
                                s.clone()
                            }
                        })
                        .collect();
                    vec![(key, CachedValue::Submissions(list))]
                }
                None => Vec::new(),
            },
            move || {
                let store = store.clone();
                async move { store.set_submission_status(id, status).await }
            },
        )
        .await
    }

    /// Deletes a submission (admin surface).
    pub async fn delete_submission(&self, id: SubmissionId) -> SyncResult<()> {
        let key = CacheKey::Submissions;
        let store = self.store.clone();
        self.run_mutation(
            key,
            &[key],
            |registry| match registry.peek(key).and_then(|v| v.as_submissions()) {
                Some(subs) => {
                    let mut list = subs.to_vec();
                    list.retain(|s| s.id != id);
                    vec![(key, CachedValue::Submissions(list))]
                }
                None => Vec::new(),
            },
            move || {
                let store = store.clone();
                async move { store.delete_submission(id).await }
            },
        )
        .await
    }

    // ── Read internals ───────────────────────────────────────────

    async fn read_key(&self, key: CacheKey) -> CachedValue {
        loop {
            let waiter = {
                let mut state = self.state.lock().await;
                state.registry.sweep();
                match state.registry.read(key) {
                    Lookup::Fresh(value) => return value,
                    Lookup::Stale(value) => {
                        // Serve the stale value now, refresh behind it.
                        self.spawn_refresh(key, &mut state);
                        return value;
                    }
                    Lookup::Absent => match state.fetches.get(&key) {
                        Some(rx) => Waiter::Follow(rx.clone()),
                        None => {
                            let (tx, rx) = watch::channel(false);
                            state.fetches.insert(key, rx);
                            Waiter::Lead(tx)
                        }
                    },
                }
            };
            match waiter {
                Waiter::Follow(mut rx) => {
                    // Wake when the leading fetch lands (or is dropped),
                    // then re-read the registry.
                    let _ = rx.changed().await;
                }
                Waiter::Lead(tx) => {
                    let value = self.fetch_value(key).await;
                    let mut state = self.state.lock().await;
                    state.registry.write(key, value.clone());
                    state.fetches.remove(&key);
                    let _ = tx.send(true);
                    return value;
                }
            }
        }
    }

    fn spawn_refresh(&self, key: CacheKey, state: &mut State) {
        if state.fetches.contains_key(&key) {
            return;
        }
        let (tx, rx) = watch::channel(false);
        state.fetches.insert(key, rx);
        let this = self.clone();
        tokio::spawn(async move {
            let value = this.fetch_value(key).await;
            let mut state = this.state.lock().await;
            state.registry.write(key, value);
            state.fetches.remove(&key);
            let _ = tx.send(true);
        });
    }

    /// Fetches authoritative data for a key. Never fails: the content
    /// store absorbs read errors into fallback or seeded data.
    async fn fetch_value(&self, key: CacheKey) -> CachedValue {
        match key {
            CacheKey::Content(locale) => CachedValue::Content(self.store.content(locale).await),
            CacheKey::Posts(locale) => CachedValue::Posts(self.store.posts(locale).await),
            CacheKey::Submissions => CachedValue::Submissions(self.store.submissions().await),
        }
    }

    // ── Mutation internals ───────────────────────────────────────

    async fn run_mutation<B, F, Fut>(
        &self,
        primary: CacheKey,
        invalidate: &[CacheKey],
        build: B,
        commit: F,
    ) -> SyncResult<()>
    where
        B: FnOnce(&Registry) -> Vec<(CacheKey, CachedValue)>,
        F: FnMut() -> Fut,
        Fut: Future<Output = StoreResult<()>>,
    {
        // Apply: snapshot, write the optimistic value, issue a sequence
        // number — all in one critical section, so subscribers observe the
        // optimistic state synchronously with the call.
        let ticket = {
            let mut state = self.state.lock().await;
            let edits = build(&state.registry);
            let seq = state.ledger.issue(primary);
            let snapshots = edits
                .iter()
                .map(|(key, _)| (*key, state.registry.snapshot(*key)))
                .collect();
            for (key, value) in edits {
                state.registry.write(key, value);
            }
            MutationTicket {
                primary,
                seq,
                snapshots,
            }
        };

        // Commit, off the lock.
        let result = retry::commit_with_retry(&self.config.retry, commit).await;

        // Reconcile or roll back.
        let mut state = self.state.lock().await;
        let is_latest = state.ledger.is_latest(ticket.primary, ticket.seq);
        state.ledger.settle(ticket.primary, ticket.seq);
        match result {
            Ok(()) => {
                if is_latest {
                    // The optimistic guess is not final: force the next
                    // read to refetch authoritative data.
                    for key in invalidate {
                        state.registry.invalidate(*key);
                    }
                } else {
                    debug!(key = %ticket.primary, seq = ticket.seq, "superseded mutation settled");
                }
                Ok(())
            }
            Err(err) => {
                if is_latest {
                    for (key, snapshot) in ticket.snapshots {
                        state.registry.restore(key, snapshot);
                    }
                } else {
                    // A newer mutation owns the registry state now; this
                    // one's rollback would clobber it.
                    debug!(key = %ticket.primary, seq = ticket.seq, "superseded mutation discards rollback");
                }
                Err(err.into())
            }
        }
    }
}

/// Replaces a post by id, or inserts it, keeping newest-first order.
fn place_post(list: &mut Vec<BlogPost>, post: BlogPost) {
    list.retain(|p| p.id != post.id);
    list.push(post);
    list.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}
