//! A scriptable in-memory remote store for adapter tests.

use async_trait::async_trait;
use inteca_remote::{RemoteStore, StoreError, StoreResult};
use inteca_types::{
    BlogPost, ContactSubmission, ContentDocument, Locale, PostId, SubmissionId, SubmissionStatus,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory [`RemoteStore`] with switchable failure modes.
#[derive(Default)]
pub struct MockRemote {
    pub content: Mutex<HashMap<Locale, ContentDocument>>,
    pub posts: Mutex<Vec<BlogPost>>,
    pub submissions: Mutex<Vec<ContactSubmission>>,
    /// Every call fails with `RemoteUnavailable`.
    pub unavailable: AtomicBool,
    /// Write calls fail with `RemoteUnavailable`; reads still work.
    pub fail_writes: AtomicBool,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, on: bool) {
        self.unavailable.store(on, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::RemoteUnavailable("mock offline".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        self.check_read()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::RemoteUnavailable("mock write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_content(&self, locale: Locale) -> StoreResult<ContentDocument> {
        self.check_read()?;
        self.content
            .lock()
            .unwrap()
            .get(&locale)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("content:{locale}")))
    }

    async fn put_content(&self, doc: &ContentDocument) -> StoreResult<()> {
        self.check_write()?;
        self.content.lock().unwrap().insert(doc.locale, doc.clone());
        Ok(())
    }

    async fn list_posts(&self, locale: Locale) -> StoreResult<Vec<BlogPost>> {
        self.check_read()?;
        let mut posts: Vec<BlogPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.locale == locale)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        Ok(posts)
    }

    async fn upsert_post(&self, post: &BlogPost) -> StoreResult<()> {
        self.check_write()?;
        let mut posts = self.posts.lock().unwrap();
        posts.retain(|p| p.id != post.id);
        posts.push(post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<()> {
        self.check_write()?;
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_submissions(&self) -> StoreResult<Vec<ContactSubmission>> {
        self.check_read()?;
        let mut subs = self.submissions.lock().unwrap().clone();
        subs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subs)
    }

    async fn insert_submission(&self, submission: &ContactSubmission) -> StoreResult<()> {
        self.check_write()?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> StoreResult<()> {
        self.check_write()?;
        let mut subs = self.submissions.lock().unwrap();
        for sub in subs.iter_mut() {
            if sub.id == id {
                *sub = sub.with_status(status);
            }
        }
        Ok(())
    }

    async fn delete_submission(&self, id: SubmissionId) -> StoreResult<()> {
        self.check_write()?;
        self.submissions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}
