//! Offer localization layer.
//!
//! Takes canonical offers from the ingest stage and produces text for one
//! locale, plus the small formatting helpers the pages need.
//!
//! ## What we do
//!
//! - Resolve translation blocks into a [`LocalizedOfferView`]
//!   ([`resolve`], [`resolve_with`]), all-or-nothing by default and per field
//!   when [`FallbackMode::PerField`] is configured
//! - Answer translation questions about an offer ([`has_translation`],
//!   [`available_languages`], [`best_language`])
//! - Format durations and star ratings ([`format_duration`], [`format_stars`])
//! - Search offers in their localized text ([`search_offers`])
//! - Pick a request locale ([`negotiate`], [`from_accept_language`])
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no global state. Same offer, locale and config give the
//! same view.

mod config;
mod format;
mod negotiate;
mod resolve;
mod search;

pub use ingest::{Language, TranslationField};

pub use crate::config::{FallbackMode, ResolveConfig};
pub use crate::format::{format_duration, format_stars, STAR_GLYPH};
pub use crate::negotiate::{from_accept_language, locale_from_path, negotiate};
pub use crate::resolve::{
    available_languages, best_language, has_translation, localize_offers, localized_text,
    resolve, resolve_with, Localizable, LocalizedOfferView,
};
pub use crate::search::search_offers;
