//! Translation resolution for canonical offers.
//!
//! Resolution never touches the offer it reads from. A [`LocalizedOfferView`]
//! keeps its source offer, so a view can be resolved again to another locale
//! and gives the same result as resolving the original offer.
use ingest::{CanonicalOffer, Language, TranslationBlock, TranslationField};
use serde::ser::{Serialize, Serializer};
use tracing::trace;

use crate::config::{FallbackMode, ResolveConfig};

/// Anything that can be localized: a canonical offer or an existing view.
pub trait Localizable {
    /// The untouched canonical offer behind this value.
    fn canonical(&self) -> &CanonicalOffer;
}

impl Localizable for CanonicalOffer {
    fn canonical(&self) -> &CanonicalOffer {
        self
    }
}

impl Localizable for LocalizedOfferView {
    fn canonical(&self) -> &CanonicalOffer {
        &self.source
    }
}

/// An offer's display text resolved for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedOfferView {
    /// Resolved title, descriptions and destination.
    pub text: TranslationBlock,
    /// Language the display text is actually in.
    pub current_language: Language,
    source: CanonicalOffer,
}

impl LocalizedOfferView {
    pub fn id(&self) -> &str {
        &self.source.id
    }

    pub fn title(&self) -> &str {
        &self.text.title
    }

    pub fn short_description(&self) -> &str {
        &self.text.short_description
    }

    pub fn big_description(&self) -> &str {
        &self.text.big_description
    }

    pub fn destination(&self) -> &str {
        &self.text.destination
    }

    /// The canonical offer this view was resolved from.
    pub fn offer(&self) -> &CanonicalOffer {
        &self.source
    }

    pub fn into_offer(self) -> CanonicalOffer {
        self.source
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewWire<'a> {
    id: &'a str,
    title: &'a str,
    short_description: &'a str,
    big_description: &'a str,
    destination: &'a str,
    duration: i64,
    stars: f64,
    main_image: &'a str,
    images: &'a [String],
    available: bool,
    created_at: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a str>,
    current_language: Language,
}

impl Serialize for LocalizedOfferView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let offer = &self.source;
        ViewWire {
            id: &offer.id,
            title: &self.text.title,
            short_description: &self.text.short_description,
            big_description: &self.text.big_description,
            destination: &self.text.destination,
            duration: offer.duration,
            stars: offer.stars,
            main_image: &offer.main_image,
            images: &offer.images,
            available: offer.available,
            created_at: &offer.created_at,
            updated_at: offer.updated_at.as_deref(),
            current_language: self.current_language,
        }
        .serialize(serializer)
    }
}

/// Resolve `offer` for `locale` with the default configuration.
pub fn resolve<T: Localizable + ?Sized>(offer: &T, locale: Language) -> LocalizedOfferView {
    resolve_with(offer, locale, &ResolveConfig::default())
}

/// Resolve `offer` for `locale` using the configured fallback mode.
pub fn resolve_with<T: Localizable + ?Sized>(
    offer: &T,
    locale: Language,
    cfg: &ResolveConfig,
) -> LocalizedOfferView {
    let source = offer.canonical();
    let canonical = source.canonical_text();
    let block = source.translations.get(locale);

    let (text, current_language) = match (cfg.fallback, block) {
        (FallbackMode::WholeOffer, Some(block)) if block.is_complete() => (block.clone(), locale),
        (FallbackMode::PerField, Some(block)) => merge_fields(block, canonical, locale, cfg),
        _ => (canonical, cfg.default_language),
    };

    trace!(
        offer_id = %source.id,
        requested = %locale,
        resolved = %current_language,
        "offer_resolved"
    );

    LocalizedOfferView {
        text,
        current_language,
        source: source.clone(),
    }
}

fn merge_fields(
    block: &TranslationBlock,
    canonical: TranslationBlock,
    locale: Language,
    cfg: &ResolveConfig,
) -> (TranslationBlock, Language) {
    let mut translated_any = false;
    let mut pick = |translated: &str, fallback: String| {
        if translated.is_empty() {
            fallback
        } else {
            translated_any = true;
            translated.to_string()
        }
    };

    let text = TranslationBlock {
        title: pick(&block.title, canonical.title),
        short_description: pick(&block.short_description, canonical.short_description),
        big_description: pick(&block.big_description, canonical.big_description),
        destination: pick(&block.destination, canonical.destination),
    };
    let language = if translated_any {
        locale
    } else {
        cfg.default_language
    };
    (text, language)
}

/// One display field for `locale`, falling back to the canonical value when
/// the translation is missing or empty.
pub fn localized_text<T: Localizable + ?Sized>(
    offer: &T,
    locale: Language,
    field: TranslationField,
) -> String {
    let source = offer.canonical();
    source
        .translations
        .get(locale)
        .map(|block| block.get(field))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| source.canonical_text().get(field).to_string())
}

/// True when the offer carries a translation block for `locale`.
pub fn has_translation<T: Localizable + ?Sized>(offer: &T, locale: Language) -> bool {
    offer.canonical().translations.contains(locale)
}

/// Languages the offer has a translation block for, in [`Language`] order.
pub fn available_languages<T: Localizable + ?Sized>(offer: &T) -> Vec<Language> {
    offer.canonical().translations.languages().collect()
}

/// Picks the language to show an offer in.
///
/// `preferred` if translated, else `fallback` if translated, else the first
/// translated language, else `fallback` regardless.
pub fn best_language<T: Localizable + ?Sized>(
    offer: &T,
    preferred: Language,
    fallback: Language,
) -> Language {
    if has_translation(offer, preferred) {
        return preferred;
    }
    if has_translation(offer, fallback) {
        return fallback;
    }
    available_languages(offer)
        .first()
        .copied()
        .unwrap_or(fallback)
}

/// Resolve every offer for `locale`.
pub fn localize_offers<'a, I>(
    offers: I,
    locale: Language,
    cfg: &ResolveConfig,
) -> Vec<LocalizedOfferView>
where
    I: IntoIterator<Item = &'a CanonicalOffer>,
{
    offers
        .into_iter()
        .map(|offer| resolve_with(offer, locale, cfg))
        .collect()
}
