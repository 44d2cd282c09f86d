use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::http::header::{ACCEPT_LANGUAGE, REFERER};
use axum::http::{HeaderMap, Uri};
use axum::response::IntoResponse;
use axum::Json;
use ingest::Language;
use odyssee::{DetailPage, OfferDetail, OffersSection};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct OffersQuery {
    pub locale: Option<String>,
    /// Free-text search over the localized fields
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// Explicit `?locale=` wins, then the `/{locale}/...` prefix of the page
/// that made the call (`Referer`), then `Accept-Language`, then the default.
pub fn request_locale(explicit: Option<&str>, headers: &HeaderMap) -> Language {
    if let Some(code) = explicit.filter(|code| !code.trim().is_empty()) {
        return locale::negotiate(Some(code));
    }
    referer_locale(headers)
        .or_else(|| {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(locale::from_accept_language)
        })
        .unwrap_or(Language::DEFAULT)
}

fn referer_locale(headers: &HeaderMap) -> Option<Language> {
    let uri: Uri = headers.get(REFERER)?.to_str().ok()?.parse().ok()?;
    locale::locale_from_path(uri.path())
}

/// `GET /api/offers`
///
/// Always 200: a dead backend yields the empty section.
pub async fn list_offers(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<OffersQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let locale = request_locale(query.locale.as_deref(), &headers);
    let outcome = state.client.fetch_collection().await;

    let section = OffersSection::assemble_matching(
        outcome,
        locale,
        &state.resolve,
        query.q.as_deref().unwrap_or_default(),
    );

    tracing::debug!(locale = %locale, cards = section.cards().len(), "Offers listed");
    Json(section)
}

/// `GET /api/offers/{id}`
pub async fn get_offer(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> ServerResult<impl IntoResponse> {
    let locale = request_locale(query.locale.as_deref(), &headers);
    let lookup = state.client.fetch_by_id(&id).await;

    match OfferDetail::assemble(lookup, locale, &state.resolve) {
        DetailPage::Found(detail) => Ok(Json(*detail)),
        DetailPage::NotFound => Err(ServerError::OfferNotFound(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn explicit_locale_beats_header() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-FR,fr;q=0.9"));
        assert_eq!(request_locale(Some("en"), &headers), Language::En);
        assert_eq!(request_locale(None, &headers), Language::Fr);
        assert_eq!(request_locale(Some(""), &headers), Language::Fr);
    }

    #[test]
    fn referring_page_prefix_beats_accept_language() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
        headers.insert(
            REFERER,
            HeaderValue::from_static("https://www.odysseetravelservices.com/fr/offers/sahara"),
        );
        assert_eq!(request_locale(None, &headers), Language::Fr);
        assert_eq!(request_locale(Some("en"), &headers), Language::En);

        // No locale prefix on the referring page: the header decides.
        headers.insert(REFERER, HeaderValue::from_static("https://example.com/about"));
        assert_eq!(request_locale(None, &headers), Language::En);
        headers.insert(REFERER, HeaderValue::from_static("not a url"));
        assert_eq!(request_locale(None, &headers), Language::En);
    }

    #[test]
    fn unsupported_locale_falls_back() {
        let headers = HeaderMap::new();
        assert_eq!(request_locale(Some("de"), &headers), Language::En);
        assert_eq!(request_locale(None, &headers), Language::En);
    }
}
