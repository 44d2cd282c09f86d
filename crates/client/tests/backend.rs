//! Client behaviour against a local mock of the offers backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use client::{ClientConfig, ContactSubmission, OffersClient};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    query: HashMap<String, String>,
    cache_control: Option<String>,
    body: Option<Value>,
}

impl Recorder {
    fn push(&self, entry: Recorded) {
        self.requests.lock().unwrap().push(entry);
    }

    fn all(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn cache_control(headers: &HeaderMap) -> Option<String> {
    headers
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/api"))
}

fn catalogue() -> Value {
    json!([
        {"id": "a", "title": "Sahara nights", "available": true},
        {"id": "b c", "title": "Spaced id", "available": true}
    ])
}

/// Backend whose collection endpoint answers with `collection` and whose
/// by-id endpoint answers with `by_id` (or 404 when `None`).
async fn backend(collection: Value, by_id: Option<Value>) -> anyhow::Result<(String, Recorder)> {
    let recorder = Recorder::default();

    let list = move |State(rec): State<Recorder>,
                     Query(query): Query<HashMap<String, String>>,
                     headers: HeaderMap| {
        let collection = collection.clone();
        async move {
            rec.push(Recorded {
                path: "/api/offers".into(),
                query,
                cache_control: cache_control(&headers),
                body: None,
            });
            Json(collection)
        }
    };

    let one = move |State(rec): State<Recorder>, Path(id): Path<String>, headers: HeaderMap| {
        let by_id = by_id.clone();
        async move {
            rec.push(Recorded {
                path: format!("/api/offers/{id}"),
                query: HashMap::new(),
                cache_control: cache_control(&headers),
                body: None,
            });
            match by_id {
                Some(body) => Json(body).into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
    };

    let contacts = |State(rec): State<Recorder>, Json(body): Json<Value>| async move {
        rec.push(Recorded {
            path: "/api/contacts".into(),
            query: HashMap::new(),
            cache_control: None,
            body: Some(body),
        });
        Json(json!({"ok": true}))
    };

    let newspaper = |State(rec): State<Recorder>, Json(body): Json<Value>| async move {
        rec.push(Recorded {
            path: "/api/newspaper".into(),
            query: HashMap::new(),
            cache_control: None,
            body: Some(body),
        });
        StatusCode::CREATED
    };

    let app = Router::new()
        .route("/api/offers", get(list))
        .route("/api/offers/{id}", get(one))
        .route("/api/contacts", post(contacts))
        .route("/api/newspaper", post(newspaper))
        .with_state(recorder.clone());

    Ok((spawn(app).await?, recorder))
}

#[tokio::test]
async fn collection_fetch_sends_no_store_and_translation_flag() -> anyhow::Result<()> {
    let (base, recorder) = backend(catalogue(), None).await?;
    let client = OffersClient::new(ClientConfig::new(base).with_include_translations(true));

    let outcome = client.fetch_collection().await;
    assert!(outcome.success);
    assert_eq!(outcome.data.len(), 2);

    let requests = recorder.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].cache_control.as_deref(), Some("no-store"));
    assert_eq!(
        requests[0].query.get("includeTranslations").map(String::as_str),
        Some("true")
    );
    Ok(())
}

#[tokio::test]
async fn collection_fetch_without_translation_flag() -> anyhow::Result<()> {
    let (base, recorder) = backend(catalogue(), None).await?;
    let client = OffersClient::new(ClientConfig::new(format!("{base}/")));

    assert!(client.fetch_collection().await.success);
    assert!(recorder.all()[0].query.is_empty());
    Ok(())
}

#[tokio::test]
async fn wrapped_collection_is_unwrapped() -> anyhow::Result<()> {
    let (base, _) = backend(json!({"success": true, "data": catalogue()}), None).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_collection().await;
    assert!(outcome.success);
    assert_eq!(outcome.data[0].id.as_deref(), Some("a"));
    Ok(())
}

#[tokio::test]
async fn empty_collection_is_success() -> anyhow::Result<()> {
    let (base, _) = backend(json!([]), None).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_collection().await;
    assert!(outcome.success);
    assert!(outcome.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn server_error_folds_into_failed_outcome() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/offers",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
    );
    let base = spawn(app).await?;

    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_collection().await;
    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    let message = outcome.message.unwrap_or_default();
    assert!(message.contains("500"), "message was {message}");
    Ok(())
}

#[tokio::test]
async fn malformed_json_folds_into_failed_outcome() -> anyhow::Result<()> {
    let app = Router::new().route("/api/offers", get(|| async { "<html>oops</html>" }));
    let base = spawn(app).await?;

    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_collection().await;
    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_body_folds_into_failed_outcome() -> anyhow::Result<()> {
    let app = Router::new().route("/api/offers", get(|| async { "" }));
    let base = spawn(app).await?;

    let client = OffersClient::new(ClientConfig::new(base));
    let outcome = client.fetch_collection().await;
    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    assert!(outcome.message.is_some());
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_folds_into_failed_outcome() -> anyhow::Result<()> {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}/api")).with_timeout_secs(2);
    let client = OffersClient::new(config);
    let outcome = client.fetch_collection().await;
    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn fetch_by_id_direct_hit() -> anyhow::Result<()> {
    let (base, recorder) =
        backend(catalogue(), Some(json!({"data": {"id": "a", "title": "Direct"}}))).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_by_id("a").await;

    assert!(outcome.success);
    assert_eq!(outcome.data.unwrap().title.as_deref(), Some("Direct"));
    let requests = recorder.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/offers/a");
    assert_eq!(requests[0].cache_control.as_deref(), Some("no-store"));
    Ok(())
}

#[tokio::test]
async fn fetch_by_id_encodes_path_segment() -> anyhow::Result<()> {
    let (base, recorder) = backend(catalogue(), Some(json!({"id": "b c"}))).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_by_id("b c").await;

    assert!(outcome.success);
    assert!(outcome.data.is_some());
    // The router decodes the segment back to the raw id.
    assert_eq!(recorder.all()[0].path, "/api/offers/b c");
    Ok(())
}

#[tokio::test]
async fn fetch_by_id_falls_back_to_collection() -> anyhow::Result<()> {
    let (base, recorder) = backend(catalogue(), None).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_by_id("a").await;

    assert!(outcome.success);
    assert_eq!(outcome.data.unwrap().title.as_deref(), Some("Sahara nights"));
    let paths: Vec<String> = recorder.all().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/api/offers/a", "/api/offers"]);
    Ok(())
}

#[tokio::test]
async fn fetch_by_id_mismatched_body_falls_back() -> anyhow::Result<()> {
    let (base, _) = backend(catalogue(), Some(json!({"id": "someone-else"}))).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_by_id("a").await;
    assert!(outcome.success);
    assert_eq!(outcome.data.unwrap().id.as_deref(), Some("a"));
    Ok(())
}

#[tokio::test]
async fn fetch_by_id_not_found_is_success_with_none() -> anyhow::Result<()> {
    let (base, _) = backend(catalogue(), None).await?;
    let outcome = OffersClient::new(ClientConfig::new(base)).fetch_by_id("zzz").await;
    assert!(outcome.success);
    assert!(outcome.data.is_none());
    Ok(())
}

#[tokio::test]
async fn submissions_post_backend_field_names() -> anyhow::Result<()> {
    let (base, recorder) = backend(json!([]), None).await?;
    let client = OffersClient::new(ClientConfig::new(base));

    let contact = ContactSubmission::new("Amel", "Ben Ali", "amel@example.tn", "+216", "Hi");
    assert!(client.submit_contact(&contact).await.success);
    assert!(client.subscribe_newsletter("amel@example.tn").await.success);

    let requests = recorder.all();
    assert_eq!(requests.len(), 2);

    let contact_body = requests[0].body.clone().unwrap();
    assert_eq!(requests[0].path, "/api/contacts");
    assert_eq!(contact_body["Email"], "amel@example.tn");
    assert_eq!(contact_body["familyName"], "Ben Ali");
    assert!(contact_body["messageSentAt"].is_string());

    assert_eq!(requests[1].path, "/api/newspaper");
    assert_eq!(requests[1].body, Some(json!({"email": "amel@example.tn"})));
    Ok(())
}
