#![allow(dead_code)]
//! A scriptable remote store for coordinator tests.
//!
//! Write calls consume a queue of scripts; a script can hold the call at a
//! gate until the test releases it, and decide success or failure. With no
//! script queued, writes succeed immediately. Reads can be gated as a
//! group, for single-flight tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use inteca_remote::{ContentStore, RemoteStore, StoreError, StoreResult};
use inteca_store::FallbackStore;
use inteca_sync::{Coordinator, SyncConfig};
use inteca_types::{
    BlogPost, ContactForm, ContactSubmission, ContentDocument, ContentPatch, HeroSection, Locale,
    PostId, SubmissionId, SubmissionStatus,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub struct WriteScript {
    gate: Option<Arc<Notify>>,
    fail: bool,
}

impl WriteScript {
    pub fn ok() -> Self {
        Self {
            gate: None,
            fail: false,
        }
    }

    pub fn fail() -> Self {
        Self {
            gate: None,
            fail: true,
        }
    }

    pub fn gated_ok(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            fail: false,
        }
    }

    pub fn gated_fail(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            fail: true,
        }
    }
}

#[derive(Default)]
pub struct GatedRemote {
    pub content: Mutex<HashMap<Locale, ContentDocument>>,
    pub posts: Mutex<Vec<BlogPost>>,
    pub submissions: Mutex<Vec<ContactSubmission>>,
    scripts: Mutex<VecDeque<WriteScript>>,
    read_gate: Mutex<Option<Arc<Notify>>>,
    pub content_fetches: Mutex<HashMap<Locale, usize>>,
    pub write_calls: AtomicUsize,
}

impl GatedRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, script: WriteScript) {
        self.scripts.lock().unwrap().push_back(script);
    }

    pub fn gate_reads(&self, gate: Arc<Notify>) {
        *self.read_gate.lock().unwrap() = Some(gate);
    }

    pub fn content_fetch_count(&self, locale: Locale) -> usize {
        self.content_fetches
            .lock()
            .unwrap()
            .get(&locale)
            .copied()
            .unwrap_or(0)
    }

    async fn pass_read_gate(&self) {
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    async fn next_write(&self) -> StoreResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.lock().unwrap().pop_front();
        match script {
            Some(script) => {
                if let Some(gate) = script.gate {
                    gate.notified().await;
                }
                if script.fail {
                    Err(StoreError::RemoteUnavailable("scripted failure".to_string()))
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for GatedRemote {
    fn provider_name(&self) -> &'static str {
        "gated-mock"
    }

    async fn fetch_content(&self, locale: Locale) -> StoreResult<ContentDocument> {
        *self
            .content_fetches
            .lock()
            .unwrap()
            .entry(locale)
            .or_insert(0) += 1;
        self.pass_read_gate().await;
        self.content
            .lock()
            .unwrap()
            .get(&locale)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("content:{locale}")))
    }

    async fn put_content(&self, doc: &ContentDocument) -> StoreResult<()> {
        self.next_write().await?;
        self.content.lock().unwrap().insert(doc.locale, doc.clone());
        Ok(())
    }

    async fn list_posts(&self, locale: Locale) -> StoreResult<Vec<BlogPost>> {
        self.pass_read_gate().await;
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
        self.next_write().await?;
        let mut posts = self.posts.lock().unwrap();
        posts.retain(|p| p.id != post.id);
        posts.push(post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<()> {
        self.next_write().await?;
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_submissions(&self) -> StoreResult<Vec<ContactSubmission>> {
        self.pass_read_gate().await;
        let mut subs = self.submissions.lock().unwrap().clone();
        subs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subs)
    }

    async fn insert_submission(&self, submission: &ContactSubmission) -> StoreResult<()> {
        self.next_write().await?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> StoreResult<()> {
        self.next_write().await?;
        let mut subs = self.submissions.lock().unwrap();
        for sub in subs.iter_mut() {
            if sub.id == id {
                *sub = sub.with_status(status);
            }
        }
        Ok(())
    }

    async fn delete_submission(&self, id: SubmissionId) -> StoreResult<()> {
        self.next_write().await?;
        self.submissions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

// ── Builders ─────────────────────────────────────────────────────

pub fn coordinator(remote: &Arc<GatedRemote>) -> Coordinator {
    coordinator_with_config(remote, SyncConfig::default())
}

pub fn coordinator_with_config(remote: &Arc<GatedRemote>, config: SyncConfig) -> Coordinator {
    let store = ContentStore::new(
        Some(remote.clone() as Arc<dyn RemoteStore>),
        FallbackStore::open_in_memory().unwrap(),
    );
    Coordinator::new(Arc::new(store), config)
}

pub fn hero_patch(title: &str) -> ContentPatch {
    ContentPatch {
        hero: Some(HeroSection {
            title: Some(title.to_string()),
            ..HeroSection::default()
        }),
        ..ContentPatch::default()
    }
}

pub fn founder_patch(name: &str) -> ContentPatch {
    ContentPatch {
        founder: Some(inteca_types::FounderSection {
            name: Some(name.to_string()),
            ..Default::default()
        }),
        ..ContentPatch::default()
    }
}

pub fn hero_title(doc: &ContentDocument) -> Option<String> {
    doc.sections.hero.as_ref()?.title.clone()
}

pub fn founder_name(doc: &ContentDocument) -> Option<String> {
    doc.sections.founder.as_ref()?.name.clone()
}

pub fn post(locale: Locale, title: &str, ymd: (i32, u32, u32)) -> BlogPost {
    BlogPost::new(
        locale,
        title,
        NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
    )
}

pub fn valid_form() -> ContactForm {
    ContactForm {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        phone: None,
        message: "Здравствуйте!".to_string(),
    }
}

/// Lets spawned tasks run up to their next suspension point.
pub async fn settle_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Opt-in tracing output for debugging a failing test
/// (`RUST_LOG=inteca_sync=debug cargo test ...`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
