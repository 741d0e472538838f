//! Remote store abstraction trait.
//!
//! Defines a common interface over hosted table providers, so the adapter
//! and the coordinator never depend on a concrete backend. Implementations
//! return plain transport-level errors; the adapter layer wraps write
//! failures with the attempted operation.

use crate::error::StoreResult;
use async_trait::async_trait;
use inteca_types::{
    BlogPost, ContactSubmission, ContentDocument, Locale, PostId, SubmissionId, SubmissionStatus,
};

/// Abstract remote table interface.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the name of the remote provider.
    fn provider_name(&self) -> &'static str;

    // ── site_content ─────────────────────────────────────────────

    /// Fetches the content document for a locale.
    /// Returns `NotFound` when no row exists for the locale.
    async fn fetch_content(&self, locale: Locale) -> StoreResult<ContentDocument>;

    /// Writes a full content document for its locale (insert or replace).
    async fn put_content(&self, doc: &ContentDocument) -> StoreResult<()>;

    // ── blog_posts ───────────────────────────────────────────────

    /// Lists all posts for a locale, newest first. Drafts included; the
    /// public surface filters client-side.
    async fn list_posts(&self, locale: Locale) -> StoreResult<Vec<BlogPost>>;

    /// Inserts or updates a post by id.
    async fn upsert_post(&self, post: &BlogPost) -> StoreResult<()>;

    /// Deletes a post by id.
    async fn delete_post(&self, id: PostId) -> StoreResult<()>;

    // ── contact_submissions ──────────────────────────────────────

    /// Lists all submissions, newest first.
    async fn list_submissions(&self) -> StoreResult<Vec<ContactSubmission>>;

    /// Inserts a new submission.
    async fn insert_submission(&self, submission: &ContactSubmission) -> StoreResult<()>;

    /// Updates a submission's status and bumps its `updated_at`.
    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> StoreResult<()>;

    /// Deletes a submission by id.
    async fn delete_submission(&self, id: SubmissionId) -> StoreResult<()>;
}
