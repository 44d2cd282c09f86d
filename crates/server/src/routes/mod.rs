//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Liveness and readiness probes
//! - `offers`: Localized offer listings and detail pages
//! - `submissions`: Contact form and newsletter intake
//! - `seo`: `sitemap.xml` and `robots.txt`
//! - `analytics`: Analytics settings for the page

pub mod analytics;
pub mod health;
pub mod offers;
pub mod seo;
pub mod submissions;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Odyssee Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Odyssee Server",
        "version": env!("CARGO_PKG_VERSION"),
        "locales": odyssee::Language::ALL,
        "endpoints": [
            "/api/offers",
            "/api/offers/{id}",
            "/api/contacts",
            "/api/newsletter",
            "/api/analytics",
            "/sitemap.xml",
            "/robots.txt",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// 405 handler for the POST-only submission routes.
pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
