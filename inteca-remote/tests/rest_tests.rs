use inteca_remote::{RemoteConfig, RemoteStore, RestStore, StoreError};
use inteca_types::{ContactForm, ContactSubmission, ContentDocument, Locale, PostId, SubmissionStatus};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> RestStore {
    RestStore::new(RemoteConfig::new(server.uri(), "anon-key"))
}

// ── site_content ─────────────────────────────────────────────────

#[tokio::test]
async fn fetch_content_decodes_row() {
    let server = MockServer::start().await;
    let doc = ContentDocument::seeded(Locale::Ru);
    Mock::given(method("GET"))
        .and(path("/rest/v1/site_content"))
        .and(query_param("key", "eq.content:ru"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "content:ru", "data": doc}
        ])))
        .mount(&server)
        .await;

    let fetched = store_for(&server).fetch_content(Locale::Ru).await.unwrap();
    assert_eq!(fetched.locale, Locale::Ru);
    assert!(fetched.sections.hero.is_some());
}

#[tokio::test]
async fn fetch_content_empty_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/site_content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = store_for(&server).fetch_content(Locale::En).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn server_error_is_remote_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/site_content"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = store_for(&server).fetch_content(Locale::Ru).await.unwrap_err();
    assert!(matches!(err, StoreError::RemoteUnavailable(_)));
}

#[tokio::test]
async fn unreachable_host_is_remote_unavailable() {
    // Nothing listens here.
    let store = RestStore::new(RemoteConfig::new("http://127.0.0.1:9", "anon-key"));
    let err = store.fetch_content(Locale::Ru).await.unwrap_err();
    assert!(matches!(err, StoreError::RemoteUnavailable(_)));
}

#[tokio::test]
async fn rejection_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/site_content"))
        .respond_with(ResponseTemplate::new(403).set_body_string("row-level security"))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .put_content(&ContentDocument::seeded(Locale::Ru))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 403, .. }));
}

#[tokio::test]
async fn put_content_upserts_on_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/site_content"))
        .and(query_param("on_conflict", "key"))
        .and(header("Prefer", "resolution=merge-duplicates"))
        .and(body_partial_json(json!([{"key": "content:kz"}])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .put_content(&ContentDocument::seeded(Locale::Kz))
        .await
        .unwrap();
}

// ── blog_posts ───────────────────────────────────────────────────

#[tokio::test]
async fn list_posts_filters_by_language() {
    let server = MockServer::start().await;
    let id = PostId::new();
    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("language", "eq.en"))
        .and(query_param("order", "date.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": id,
            "title": "Managing up",
            "date": "2025-06-01",
            "language": "en",
            "tags": ["management"],
            "featured": true
        }])))
        .mount(&server)
        .await;

    let posts = store_for(&server).list_posts(Locale::En).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, id);
    assert_eq!(posts[0].locale, Locale::En);
    assert!(posts[0].featured);
    // Columns the row omitted fall back to defaults.
    assert!(posts[0].published);
    assert_eq!(posts[0].author, "");
}

#[tokio::test]
async fn delete_post_targets_id() {
    let server = MockServer::start().await;
    let id = PostId::new();
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).delete_post(id).await.unwrap();
}

// ── contact_submissions ──────────────────────────────────────────

#[tokio::test]
async fn insert_submission_posts_row() {
    let server = MockServer::start().await;
    let sub = ContactSubmission::from_form(ContactForm {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        phone: None,
        message: "hello".to_string(),
    });
    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_submissions"))
        .and(body_partial_json(json!([{
            "name": "Dana",
            "status": "new"
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).insert_submission(&sub).await.unwrap();
}

#[tokio::test]
async fn status_update_patches_row() {
    let server = MockServer::start().await;
    let sub = ContactSubmission::from_form(ContactForm {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        phone: None,
        message: "hello".to_string(),
    });
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/contact_submissions"))
        .and(query_param("id", format!("eq.{}", sub.id)))
        .and(body_partial_json(json!({"status": "replied"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .update_submission_status(sub.id, SubmissionStatus::Replied)
        .await
        .unwrap();
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn auth_token_overrides_bearer() {
    let config = RemoteConfig::new("https://x.example.co", "anon").with_auth_token("session");
    assert_eq!(config.auth_token.as_deref(), Some("session"));
    assert_eq!(config.api_key, "anon");
}
