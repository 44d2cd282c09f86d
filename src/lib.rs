//! Workspace umbrella crate for the Odyssee offers site.
//!
//! Stitches the fetch client, the normalizer and the localizer together and
//! turns their output into page-ready data: listing cards, detail pages and
//! the sitemap.
//!
//! ```
//! use odyssee::{FetchOutcome, Language, OffersSection, RawOffer, ResolveConfig};
//!
//! let raw: Vec<RawOffer> = serde_json::from_str(
//!     r#"[{"id": "a", "title": "X", "stars": 4, "duration": 3, "available": true}]"#,
//! ).unwrap();
//!
//! let cfg = ResolveConfig::default();
//! let section = OffersSection::assemble(FetchOutcome::ok(raw), Language::Fr, &cfg);
//! let card = &section.cards()[0];
//! assert_eq!(card.title, "X");
//! assert_eq!(card.duration, "3 jours");
//! assert_eq!(card.stars, "4 ⭐");
//! ```

pub use client::{
    ClientConfig, ClientError, ContactSubmission, FetchOutcome, OffersClient, build_api_url,
};
pub use ingest::{
    CanonicalOffer, IngestError, Language, LanguageError, RawOffer, TranslationBlock,
    TranslationField, Translations, image_src, normalize, normalize_collection,
};
pub use locale::{
    FallbackMode, LocalizedOfferView, ResolveConfig, available_languages, best_language,
    format_duration, format_stars, has_translation, negotiate, resolve, resolve_with,
    search_offers,
};

mod presentation;
mod sitemap;

pub use crate::presentation::{
    DetailPage, OfferCard, OfferDetail, OffersSection, PageMeta, SITE_NAME, offer_href,
};
pub use crate::sitemap::{
    ChangeFrequency, SECTION_ANCHORS, SitemapEntry, build_sitemap, render_robots_txt,
    render_sitemap_xml,
};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur while turning a backend response into offers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The backend call itself failed; carries the client's message.
    #[error("offer fetch failed: {0}")]
    Fetch(String),
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),
    #[error("unsupported locale: {0}")]
    Language(#[from] LanguageError),
}

/// Canonical offers from a collection fetch.
///
/// Records the normalizer rejects are skipped; only a failed fetch is an
/// error.
pub fn load_offers(
    outcome: FetchOutcome<Vec<RawOffer>>,
) -> Result<Vec<CanonicalOffer>, PipelineError> {
    if !outcome.success {
        return Err(fetch_error(outcome.message));
    }
    Ok(normalize_collection(outcome.data))
}

/// Canonical offer from a by-id fetch; `Ok(None)` when it does not exist.
pub fn load_offer(
    outcome: FetchOutcome<Option<RawOffer>>,
) -> Result<Option<CanonicalOffer>, PipelineError> {
    if !outcome.success {
        return Err(fetch_error(outcome.message));
    }
    outcome
        .data
        .map(normalize)
        .transpose()
        .map_err(PipelineError::from)
}

/// Parses a locale code strictly, unlike [`negotiate`] which falls back.
pub fn parse_locale(code: &str) -> Result<Language, PipelineError> {
    Ok(code.parse::<Language>()?)
}

fn fetch_error(message: Option<String>) -> PipelineError {
    let message = message.unwrap_or_else(|| "unknown error".to_string());
    warn!(error = %message, "offers_unavailable");
    PipelineError::Fetch(message)
}
