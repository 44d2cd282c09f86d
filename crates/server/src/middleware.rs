use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Paths hit by orchestrators and crawlers on a schedule; logged at debug.
const QUIET_PATHS: [&str; 4] = ["/health", "/ready", "/robots.txt", "/sitemap.xml"];

/// Per-request id, taken from `x-request-id` or freshly generated.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Attaches a [`RequestId`] to the request and echoes it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn is_quiet(path: &str) -> bool {
    QUIET_PATHS.contains(&path)
}

/// One log line per request, after the response is built.
///
/// Server errors log at warn, probe and crawler paths at debug.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(%method, %path, %status, duration_ms, %request_id, "request_failed");
    } else if is_quiet(&path) {
        tracing::debug!(%method, %path, %status, duration_ms, %request_id, "request_completed");
    } else {
        tracing::info!(%method, %path, %status, duration_ms, %request_id, "request_completed");
    }

    response
}
