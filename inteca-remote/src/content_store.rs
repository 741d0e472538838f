//! The content store adapter: remote + local fallback + seeded defaults.

use crate::error::{StoreError, StoreResult, WriteOp};
use crate::store::RemoteStore;
use inteca_store::FallbackStore;
use inteca_types::{
    BlogPost, ContactSubmission, ContentDocument, ContentPatch, Locale, PostId, ResourceKind,
    SubmissionId, SubmissionStatus,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Fallback key for the submission inbox (not locale-partitioned).
const INBOX_KEY: &str = "inbox";

/// Source of truth for all content operations.
///
/// When a remote store is configured it is authoritative: reads refresh the
/// local fallback copy on success and degrade to it on transport failure;
/// writes go remote-first and leave the fallback untouched when they fail,
/// so a failed write never leaves a half-applied local state. Without a
/// remote store, every operation runs against the fallback with the same
/// keying and merge semantics.
pub struct ContentStore {
    remote: Option<Arc<dyn RemoteStore>>,
    fallback: FallbackStore,
}

impl ContentStore {
    /// Creates an adapter over an optional remote store.
    #[must_use]
    pub fn new(remote: Option<Arc<dyn RemoteStore>>, fallback: FallbackStore) -> Self {
        match &remote {
            Some(store) => info!(provider = store.provider_name(), "remote store configured"),
            None => info!("no remote store configured, running in local-fallback mode"),
        }
        Self { remote, fallback }
    }

    /// Creates an adapter in local-fallback mode.
    #[must_use]
    pub fn local_only(fallback: FallbackStore) -> Self {
        Self::new(None, fallback)
    }

    /// True when a remote store is configured.
    #[must_use]
    pub fn is_remote_backed(&self) -> bool {
        self.remote.is_some()
    }

    // ── Reads: absorb failures, never raise ──────────────────────

    /// The content document for a locale.
    ///
    /// Remote miss ("not found") yields the seeded default and clears any
    /// fallback copy, so the default is not silently persisted as if it
    /// came from the remote store. Transport failure yields the fallback
    /// copy, else the seeded default.
    pub async fn content(&self, locale: Locale) -> ContentDocument {
        if let Some(remote) = &self.remote {
            match remote.fetch_content(locale).await {
                Ok(doc) => {
                    self.refresh_fallback(ResourceKind::SiteContent, locale.as_str(), &doc);
                    return doc;
                }
                Err(StoreError::NotFound(_)) => {
                    self.clear_fallback(ResourceKind::SiteContent, locale.as_str());
                    return ContentDocument::seeded(locale);
                }
                Err(err) => {
                    warn!(%locale, error = %err, "content read failed, degrading to fallback");
                }
            }
        }
        match self.fallback.get(ResourceKind::SiteContent, locale.as_str()) {
            Ok(Some(doc)) => doc,
            Ok(None) => ContentDocument::seeded(locale),
            Err(err) => {
                warn!(%locale, error = %err, "fallback read failed, using seeded default");
                ContentDocument::seeded(locale)
            }
        }
    }

    /// The blog post list for a locale, newest first. Degrades to the
    /// fallback copy, else an empty list.
    pub async fn posts(&self, locale: Locale) -> Vec<BlogPost> {
        if let Some(remote) = &self.remote {
            match remote.list_posts(locale).await {
                Ok(posts) => {
                    self.refresh_fallback(ResourceKind::BlogPosts, locale.as_str(), &posts);
                    return posts;
                }
                Err(StoreError::NotFound(_)) => {
                    self.clear_fallback(ResourceKind::BlogPosts, locale.as_str());
                    return Vec::new();
                }
                Err(err) => {
                    warn!(%locale, error = %err, "post list read failed, degrading to fallback");
                }
            }
        }
        match self.fallback.get(ResourceKind::BlogPosts, locale.as_str()) {
            Ok(Some(posts)) => posts,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%locale, error = %err, "fallback read failed, returning empty post list");
                Vec::new()
            }
        }
    }

    /// The submission inbox, newest first (admin surface).
    pub async fn submissions(&self) -> Vec<ContactSubmission> {
        if let Some(remote) = &self.remote {
            match remote.list_submissions().await {
                Ok(subs) => {
                    self.refresh_fallback(ResourceKind::ContactSubmissions, INBOX_KEY, &subs);
                    return subs;
                }
                Err(StoreError::NotFound(_)) => {
                    self.clear_fallback(ResourceKind::ContactSubmissions, INBOX_KEY);
                    return Vec::new();
                }
                Err(err) => {
                    warn!(error = %err, "submission read failed, degrading to fallback");
                }
            }
        }
        match self.fallback.get(ResourceKind::ContactSubmissions, INBOX_KEY) {
            Ok(Some(subs)) => subs,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "fallback read failed, returning empty inbox");
                Vec::new()
            }
        }
    }

    // ── Writes: propagate failures ───────────────────────────────

    /// Merges a patch into the current document for a locale and writes the
    /// whole merged document back (read-modify-write). Returns the merged
    /// document.
    pub async fn merge_content(
        &self,
        locale: Locale,
        patch: &ContentPatch,
    ) -> StoreResult<ContentDocument> {
        let op = WriteOp::PutContent(locale);
        if let Some(remote) = &self.remote {
            let current = match remote.fetch_content(locale).await {
                Ok(doc) => doc,
                Err(StoreError::NotFound(_)) => ContentDocument::seeded(locale),
                Err(err) => return Err(StoreError::write(op, err)),
            };
            let merged = current.merged(patch);
            remote
                .put_content(&merged)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.refresh_fallback(ResourceKind::SiteContent, locale.as_str(), &merged);
            return Ok(merged);
        }
        let current = self
            .fallback
            .get::<ContentDocument>(ResourceKind::SiteContent, locale.as_str())?
            .unwrap_or_else(|| ContentDocument::seeded(locale));
        let merged = current.merged(patch);
        self.fallback
            .put(ResourceKind::SiteContent, locale.as_str(), &merged)?;
        Ok(merged)
    }

    /// Writes a full content document, replacing the current one.
    pub async fn put_content(&self, doc: &ContentDocument) -> StoreResult<()> {
        let op = WriteOp::PutContent(doc.locale);
        if let Some(remote) = &self.remote {
            remote
                .put_content(doc)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.refresh_fallback(ResourceKind::SiteContent, doc.locale.as_str(), doc);
            return Ok(());
        }
        self.fallback
            .put(ResourceKind::SiteContent, doc.locale.as_str(), doc)?;
        Ok(())
    }

    /// Inserts or updates a blog post.
    pub async fn upsert_post(&self, post: &BlogPost) -> StoreResult<()> {
        post.validate()?;
        let op = WriteOp::UpsertPost(post.id);
        if let Some(remote) = &self.remote {
            remote
                .upsert_post(post)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.update_fallback_posts(post.locale, |posts| upsert_into(posts, post.clone()));
            return Ok(());
        }
        let mut posts = self
            .fallback
            .get::<Vec<BlogPost>>(ResourceKind::BlogPosts, post.locale.as_str())?
            .unwrap_or_default();
        upsert_into(&mut posts, post.clone());
        self.fallback
            .put(ResourceKind::BlogPosts, post.locale.as_str(), &posts)?;
        Ok(())
    }

    /// Deletes a blog post.
    pub async fn delete_post(&self, locale: Locale, id: PostId) -> StoreResult<()> {
        let op = WriteOp::DeletePost(id);
        if let Some(remote) = &self.remote {
            remote
                .delete_post(id)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.update_fallback_posts(locale, |posts| posts.retain(|p| p.id != id));
            return Ok(());
        }
        let mut posts = self
            .fallback
            .get::<Vec<BlogPost>>(ResourceKind::BlogPosts, locale.as_str())?
            .unwrap_or_default();
        posts.retain(|p| p.id != id);
        self.fallback
            .put(ResourceKind::BlogPosts, locale.as_str(), &posts)?;
        Ok(())
    }

    /// Inserts a new contact submission (public surface).
    pub async fn insert_submission(&self, submission: &ContactSubmission) -> StoreResult<()> {
        let op = WriteOp::InsertSubmission(submission.id);
        if let Some(remote) = &self.remote {
            remote
                .insert_submission(submission)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.update_fallback_inbox(|subs| subs.insert(0, submission.clone()));
            return Ok(());
        }
        let mut subs = self
            .fallback
            .get::<Vec<ContactSubmission>>(ResourceKind::ContactSubmissions, INBOX_KEY)?
            .unwrap_or_default();
        subs.insert(0, submission.clone());
        self.fallback
            .put(ResourceKind::ContactSubmissions, INBOX_KEY, &subs)?;
        Ok(())
    }

    /// Changes a submission's status (admin surface).
    pub async fn set_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> StoreResult<()> {
        let op = WriteOp::UpdateSubmission(id);
        if let Some(remote) = &self.remote {
            remote
                .update_submission_status(id, status)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.update_fallback_inbox(|subs| {
                for sub in subs.iter_mut() {
                    if sub.id == id {
                        *sub = sub.with_status(status);
                    }
                }
            });
            return Ok(());
        }
        let mut subs = self
            .fallback
            .get::<Vec<ContactSubmission>>(ResourceKind::ContactSubmissions, INBOX_KEY)?
            .unwrap_or_default();
        let mut found = false;
        for sub in subs.iter_mut() {
            if sub.id == id {
                *sub = sub.with_status(status);
                found = true;
            }
        }
        if !found {
            return Err(StoreError::write(op, StoreError::NotFound(id.to_string())));
        }
        self.fallback
            .put(ResourceKind::ContactSubmissions, INBOX_KEY, &subs)?;
        Ok(())
    }

    /// Deletes a submission (admin surface).
    pub async fn delete_submission(&self, id: SubmissionId) -> StoreResult<()> {
        let op = WriteOp::DeleteSubmission(id);
        if let Some(remote) = &self.remote {
            remote
                .delete_submission(id)
                .await
                .map_err(|err| StoreError::write(op, err))?;
            self.update_fallback_inbox(|subs| subs.retain(|s| s.id != id));
            return Ok(());
        }
        let mut subs = self
            .fallback
            .get::<Vec<ContactSubmission>>(ResourceKind::ContactSubmissions, INBOX_KEY)?
            .unwrap_or_default();
        subs.retain(|s| s.id != id);
        self.fallback
            .put(ResourceKind::ContactSubmissions, INBOX_KEY, &subs)?;
        Ok(())
    }

    // ── Fallback maintenance ─────────────────────────────────────
    // A fallback refresh failing after a successful remote write must not
    // fail the write; the copy self-heals on the next successful read.

    fn refresh_fallback<T: serde::Serialize>(&self, kind: ResourceKind, key: &str, value: &T) {
        if let Err(err) = self.fallback.put(kind, key, value) {
            warn!(%kind, key, error = %err, "fallback refresh failed");
        }
    }

    fn clear_fallback(&self, kind: ResourceKind, key: &str) {
        if let Err(err) = self.fallback.remove(kind, key) {
            warn!(%kind, key, error = %err, "fallback clear failed");
        }
    }

    fn update_fallback_posts(&self, locale: Locale, edit: impl FnOnce(&mut Vec<BlogPost>)) {
        let mut posts = match self
            .fallback
            .get::<Vec<BlogPost>>(ResourceKind::BlogPosts, locale.as_str())
        {
            Ok(posts) => posts.unwrap_or_default(),
            Err(err) => {
                warn!(%locale, error = %err, "fallback post list read failed");
                return;
            }
        };
        edit(&mut posts);
        self.refresh_fallback(ResourceKind::BlogPosts, locale.as_str(), &posts);
    }

    fn update_fallback_inbox(&self, edit: impl FnOnce(&mut Vec<ContactSubmission>)) {
        let mut subs = match self
            .fallback
            .get::<Vec<ContactSubmission>>(ResourceKind::ContactSubmissions, INBOX_KEY)
        {
            Ok(subs) => subs.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "fallback inbox read failed");
                return;
            }
        };
        edit(&mut subs);
        self.refresh_fallback(ResourceKind::ContactSubmissions, INBOX_KEY, &subs);
    }
}

/// Replaces a post by id, or inserts it; keeps the newest-first order the
/// remote listing uses.
fn upsert_into(posts: &mut Vec<BlogPost>, post: BlogPost) {
    posts.retain(|p| p.id != post.id);
    posts.push(post);
    posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}
