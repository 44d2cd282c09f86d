use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use std::sync::Arc;

/// `GET /sitemap.xml`
///
/// Lists offer pages when the backend answers; otherwise only the static
/// pages and section anchors.
pub async fn sitemap(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let outcome = state.client.fetch_collection().await;
    let offers = match odyssee::load_offers(outcome) {
        Ok(offers) => offers,
        Err(err) => {
            tracing::warn!(error = %err, "Sitemap built without offers");
            Vec::new()
        }
    };

    let entries = odyssee::build_sitemap(&state.config.site_url, &offers, chrono::Utc::now());
    (
        [(CONTENT_TYPE, "application/xml")],
        odyssee::render_sitemap_xml(&entries),
    )
}

/// `GET /robots.txt`
pub async fn robots(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        odyssee::render_robots_txt(&state.config.site_url),
    )
}
