//! Hosted REST table implementation of [`RemoteStore`].
//!
//! Speaks the PostgREST dialect used by the hosted backend: one endpoint
//! per table under `/rest/v1/`, `column=eq.value` filters, and
//! `Prefer: resolution=merge-duplicates` upserts.

use crate::error::{StoreError, StoreResult};
use crate::store::RemoteStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use inteca_types::{
    BlogPost, ContactSubmission, ContentDocument, Locale, PostId, SubmissionId, SubmissionStatus,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Connection settings for the hosted table API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://xyz.example.co`.
    pub base_url: String,
    /// The project API key; sent as both `apikey` and bearer token unless
    /// a session token is set.
    pub api_key: String,
    /// Authenticated editor session token, for the administrative surface.
    pub auth_token: Option<String>,
}

impl RemoteConfig {
    /// Creates a config for the anonymous (public) surface.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            auth_token: None,
        }
    }

    /// Attaches an authenticated session token (admin surface).
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Reads the config from `INTECA_API_URL` / `INTECA_API_KEY`.
    /// Returns `None` when either is unset or empty — the caller then runs
    /// in local-fallback mode.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("INTECA_API_URL").ok()?;
        let api_key = std::env::var("INTECA_API_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url, api_key))
    }
}

/// [`RemoteStore`] implementation over the hosted REST table API.
pub struct RestStore {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RestStore {
    /// Creates a store from a config with a default HTTP client.
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .config
            .auth_token
            .as_deref()
            .unwrap_or(&self.config.api_key);
        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| StoreError::RemoteUnavailable(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(message),
            s if s.is_server_error() => {
                StoreError::RemoteUnavailable(format!("{s}: {message}"))
            }
            s => StoreError::Rejected {
                status: s.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                StoreError::InvalidRecord(err.to_string())
            } else {
                StoreError::RemoteUnavailable(err.to_string())
            }
        })
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    fn provider_name(&self) -> &'static str {
        "rest"
    }

    async fn fetch_content(&self, locale: Locale) -> StoreResult<ContentDocument> {
        let url = format!(
            "{}?select=data&key=eq.content:{locale}",
            self.table_url("site_content")
        );
        let response = self.send(self.request(Method::GET, &url)).await?;
        let rows: Vec<SiteContentRow> = Self::decode(response).await?;
        debug!(%locale, rows = rows.len(), "fetched site content");
        match rows.into_iter().next() {
            Some(row) => serde_json::from_value(row.data)
                .map_err(|err| StoreError::InvalidRecord(err.to_string())),
            None => Err(StoreError::NotFound(format!("content:{locale}"))),
        }
    }

    async fn put_content(&self, doc: &ContentDocument) -> StoreResult<()> {
        let url = format!("{}?on_conflict=key", self.table_url("site_content"));
        let row = SiteContentRow {
            key: format!("content:{}", doc.locale),
            data: serde_json::to_value(doc)?,
        };
        self.send(
            self.request(Method::POST, &url)
                .header("Prefer", "resolution=merge-duplicates")
                .json(&[row]),
        )
        .await?;
        Ok(())
    }

    async fn list_posts(&self, locale: Locale) -> StoreResult<Vec<BlogPost>> {
        let url = format!(
            "{}?select=*&language=eq.{locale}&order=date.desc",
            self.table_url("blog_posts")
        );
        let response = self.send(self.request(Method::GET, &url)).await?;
        let rows: Vec<BlogPostRow> = Self::decode(response).await?;
        Ok(rows.into_iter().map(BlogPostRow::into_post).collect())
    }

    async fn upsert_post(&self, post: &BlogPost) -> StoreResult<()> {
        let url = format!("{}?on_conflict=id", self.table_url("blog_posts"));
        self.send(
            self.request(Method::POST, &url)
                .header("Prefer", "resolution=merge-duplicates")
                .json(&[BlogPostRow::from_post(post)]),
        )
        .await?;
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<()> {
        let url = format!("{}?id=eq.{id}", self.table_url("blog_posts"));
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }

    async fn list_submissions(&self) -> StoreResult<Vec<ContactSubmission>> {
        let url = format!(
            "{}?select=*&order=created_at.desc",
            self.table_url("contact_submissions")
        );
        let response = self.send(self.request(Method::GET, &url)).await?;
        let rows: Vec<SubmissionRow> = Self::decode(response).await?;
        Ok(rows.into_iter().map(SubmissionRow::into_submission).collect())
    }

    async fn insert_submission(&self, submission: &ContactSubmission) -> StoreResult<()> {
        let url = self.table_url("contact_submissions");
        self.send(
            self.request(Method::POST, &url)
                .json(&[SubmissionRow::from_submission(submission)]),
        )
        .await?;
        Ok(())
    }

    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> StoreResult<()> {
        let url = format!("{}?id=eq.{id}", self.table_url("contact_submissions"));
        self.send(self.request(Method::PATCH, &url).json(&json!({
            "status": status,
            "updated_at": Utc::now(),
        })))
        .await?;
        Ok(())
    }

    async fn delete_submission(&self, id: SubmissionId) -> StoreResult<()> {
        let url = format!("{}?id=eq.{id}", self.table_url("contact_submissions"));
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}

// ── Wire rows ────────────────────────────────────────────────────
// Column names follow the remote schema, which predates this client;
// the typed domain model maps onto them here and nowhere else.

#[derive(Debug, Serialize, Deserialize)]
struct SiteContentRow {
    key: String,
    data: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct BlogPostRow {
    id: PostId,
    title: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
    date: NaiveDate,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    featured: bool,
    #[serde(default = "default_true")]
    published: bool,
    language: Locale,
}

fn default_true() -> bool {
    true
}

impl BlogPostRow {
    fn from_post(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            date: post.publish_date,
            tags: post.tags.clone(),
            image: post.cover_image.clone(),
            featured: post.featured,
            published: post.published,
            language: post.locale,
        }
    }

    fn into_post(self) -> BlogPost {
        BlogPost {
            id: self.id,
            locale: self.language,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            publish_date: self.date,
            tags: self.tags,
            cover_image: self.image,
            featured: self.featured,
            published: self.published,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SubmissionRow {
    id: SubmissionId,
    name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    message: String,
    status: SubmissionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn from_submission(sub: &ContactSubmission) -> Self {
        Self {
            id: sub.id,
            name: sub.name.clone(),
            email: sub.email.clone(),
            phone: sub.phone.clone(),
            message: sub.message.clone(),
            status: sub.status,
            created_at: sub.created_at,
            updated_at: sub.updated_at,
        }
    }

    fn into_submission(self) -> ContactSubmission {
        ContactSubmission {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
