//! Offer ingest layer
//!
//! This is where offers enter the pipeline. We take whatever the backend sent
//! and turn it into a [`CanonicalOffer`] that later stages can use without
//! checking for missing fields.
//!
//! ## What we do here
//!
//! - **Default optional data** - Missing strings become `""`, missing lists
//!   become empty, missing flags become `false`. Absence is never an error.
//! - **Resolve legacy field names** - Image fields went through several names;
//!   see [`MAIN_IMAGE_ALIASES`] and [`GALLERY_ALIASES`].
//! - **Keep the language set closed** - Translation blocks for codes outside
//!   [`Language`] are dropped.
//! - **Reject only what is unusable** - A record without an identifier is the
//!   one fatal case ([`IngestError::MissingId`]).
//!
//! ## Example
//!
//! ```
//! use ingest::{normalize, RawOffer};
//!
//! let raw: RawOffer = serde_json::from_str(
//!     r#"{"id": "a", "title": "X", "stars": 4, "duration": 3, "available": true}"#,
//! ).unwrap();
//!
//! let offer = normalize(raw).unwrap();
//! assert_eq!(offer.title, "X");
//! assert_eq!(offer.main_image, "");
//! assert!(offer.images.is_empty());
//! ```
use std::collections::HashSet;

use tracing::{debug, warn, Level};

mod error;
mod images;
mod types;

pub use crate::error::{IngestError, LanguageError};
pub use crate::images::{
    image_src, resolve_gallery, resolve_main_image, GALLERY_ALIASES, MAIN_IMAGE_ALIASES,
};
pub use crate::types::{
    CanonicalOffer, Language, RawImageComparison, RawOffer, RawTranslationBlock,
    TranslationBlock, TranslationField, Translations,
};

/// Normalize one raw offer into its canonical shape.
pub fn normalize(raw: RawOffer) -> Result<CanonicalOffer, IngestError> {
    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            warn!(title = ?raw.title, "offer_rejected_missing_id");
            return Err(IngestError::MissingId);
        }
    };

    let span = tracing::span!(Level::DEBUG, "ingest.normalize", offer_id = %id);
    let _guard = span.enter();

    let main_image = match resolve_main_image(&raw) {
        Some((alias, value)) => {
            debug!(alias, "main_image_resolved");
            value
        }
        None => String::new(),
    };
    let images = resolve_gallery(&raw)
        .map(|(_, entries)| entries)
        .unwrap_or_default();
    let translations = normalize_translations(raw.translations);

    let offer = CanonicalOffer {
        id,
        title: raw.title.unwrap_or_default(),
        short_description: raw.short_description.unwrap_or_default(),
        big_description: raw.big_description.unwrap_or_default(),
        destination: raw.destination.unwrap_or_default(),
        duration: raw.duration.unwrap_or_default(),
        stars: raw.stars.unwrap_or_default(),
        main_image,
        images,
        available: raw.available.unwrap_or_default(),
        created_at: raw.created_at.unwrap_or_default(),
        updated_at: raw.updated_at.filter(|ts| !ts.trim().is_empty()),
        translations,
    };

    debug!(
        gallery_len = offer.images.len(),
        translations = offer.translations.len(),
        "offer_normalized"
    );
    Ok(offer)
}

/// Normalize a fetched collection.
///
/// Records without an identifier are skipped. When an identifier repeats, the
/// first record wins, so ids in the result are unique.
pub fn normalize_collection<I>(raws: I) -> Vec<CanonicalOffer>
where
    I: IntoIterator<Item = RawOffer>,
{
    let mut seen = HashSet::new();
    let mut offers = Vec::new();
    let mut skipped = 0usize;

    for raw in raws {
        match normalize(raw) {
            Ok(offer) => {
                if seen.insert(offer.id.clone()) {
                    offers.push(offer);
                } else {
                    warn!(offer_id = %offer.id, "duplicate_offer_id_dropped");
                    skipped += 1;
                }
            }
            Err(_) => skipped += 1,
        }
    }

    debug!(kept = offers.len(), skipped, "collection_normalized");
    offers
}

fn normalize_translations(
    raw: Option<std::collections::BTreeMap<String, types::RawTranslationBlock>>,
) -> Translations {
    raw.into_iter()
        .flatten()
        .filter_map(|(code, block)| match code.parse::<Language>() {
            Ok(language) => Some((language, TranslationBlock::from(block))),
            Err(err) => {
                debug!(error = %err, "translation_block_dropped");
                None
            }
        })
        .collect()
}
