//! Core data model types for the ingest crate.
//!
//! These types describe offers as the backend sends them ([`RawOffer`]) and
//! the defaulted shape every later stage works with ([`CanonicalOffer`]).
//!
//! # Type Hierarchy
//!
//! ```text
//! RawOffer (wire, every field optional)
//! ├── id: Option<String>                 (string or integer on the wire)
//! ├── title / shortDescription / bigDescription / destination
//! ├── duration: Option<i64>, stars: Option<f64>
//! ├── mainImage | mainImageUrl | mainImageFullUrl | image | imageComparison.mainImageFullUrl
//! ├── images | imageUrls | imageComparison.galleryImagesFullUrls
//! ├── available, createdAt, updatedAt
//! └── translations: { "<code>": RawTranslationBlock }
//!
//!         ↓ normalize()
//!
//! CanonicalOffer
//! ├── id: String (non-empty)
//! ├── title … destination: String ("" when absent)
//! ├── duration: i64, stars: f64 (0 when absent)
//! ├── main_image: String, images: Vec<String>
//! ├── available: bool, created_at: String, updated_at: Option<String>
//! └── translations: Translations (Language → TranslationBlock)
//! ```
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LanguageError;

/// Languages the site is published in.
///
/// The set is closed: translation blocks keyed by any other code are dropped
/// during normalization.
///
/// ```rust
/// use ingest::Language;
///
/// assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
/// assert_eq!(Language::default(), Language::En);
/// assert!("de".parse::<Language>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the canonical language of untranslated offer fields.
    #[default]
    En,
    /// French.
    Fr,
}

impl Language {
    /// Every supported language, in declaration order.
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    /// Language of the canonical (untranslated) offer fields.
    pub const DEFAULT: Language = Language::En;

    /// Two-letter wire code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(LanguageError::Unsupported(other.to_string())),
        }
    }
}

/// The four offer fields that carry per-language text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationField {
    Title,
    ShortDescription,
    BigDescription,
    Destination,
}

impl TranslationField {
    pub const ALL: [TranslationField; 4] = [
        TranslationField::Title,
        TranslationField::ShortDescription,
        TranslationField::BigDescription,
        TranslationField::Destination,
    ];
}

/// Offer exactly as received from the backend.
///
/// Every field is optional so that any historical response generation
/// deserializes; [`normalize`](crate::normalize) decides what is fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub big_description: Option<String>,
    pub destination: Option<String>,
    pub duration: Option<i64>,
    pub stars: Option<f64>,
    /// Base64 image bytes (current field name).
    pub main_image: Option<String>,
    /// Relative or absolute image URL (older responses).
    pub main_image_url: Option<String>,
    /// Absolute image URL (oldest responses).
    pub main_image_full_url: Option<String>,
    /// Single-image field used by the card-shaped payloads.
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_gallery")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_gallery")]
    pub image_urls: Option<Vec<String>>,
    pub image_comparison: Option<RawImageComparison>,
    pub available: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_translations")]
    pub translations: Option<BTreeMap<String, RawTranslationBlock>>,
}

/// Image diagnostics block some backend versions attach to offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImageComparison {
    pub main_image_full_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_gallery")]
    pub gallery_images_full_urls: Option<Vec<String>>,
}

/// Translation block as sent on the wire; fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTranslationBlock {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub big_description: Option<String>,
    pub destination: Option<String>,
}

/// Per-language text of an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBlock {
    pub title: String,
    pub short_description: String,
    pub big_description: String,
    pub destination: String,
}

impl TranslationBlock {
    /// True when all four fields are non-empty.
    pub fn is_complete(&self) -> bool {
        TranslationField::ALL
            .iter()
            .all(|field| !self.get(*field).is_empty())
    }

    pub fn get(&self, field: TranslationField) -> &str {
        match field {
            TranslationField::Title => &self.title,
            TranslationField::ShortDescription => &self.short_description,
            TranslationField::BigDescription => &self.big_description,
            TranslationField::Destination => &self.destination,
        }
    }
}

impl From<RawTranslationBlock> for TranslationBlock {
    fn from(raw: RawTranslationBlock) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            short_description: raw.short_description.unwrap_or_default(),
            big_description: raw.big_description.unwrap_or_default(),
            destination: raw.destination.unwrap_or_default(),
        }
    }
}

/// Translations keyed by supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<Language, TranslationBlock>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: Language) -> Option<&TranslationBlock> {
        self.0.get(&language)
    }

    pub fn contains(&self, language: Language) -> bool {
        self.0.contains_key(&language)
    }

    pub fn insert(&mut self, language: Language, block: TranslationBlock) {
        self.0.insert(language, block);
    }

    /// Languages with a block, in [`Language`] order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Language, TranslationBlock)> for Translations {
    fn from_iter<I: IntoIterator<Item = (Language, TranslationBlock)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Offer with every optional field defaulted and legacy names resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOffer {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub big_description: String,
    pub destination: String,
    pub duration: i64,
    pub stars: f64,
    pub main_image: String,
    pub images: Vec<String>,
    pub available: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub translations: Translations,
}

impl CanonicalOffer {
    /// The untranslated (default-language) text of this offer.
    pub fn canonical_text(&self) -> TranslationBlock {
        TranslationBlock {
            title: self.title.clone(),
            short_description: self.short_description.clone(),
            big_description: self.big_description.clone(),
            destination: self.destination.clone(),
        }
    }

    /// Main image first, then the gallery; empty references are skipped.
    pub fn all_images(&self) -> Vec<String> {
        std::iter::once(&self.main_image)
            .chain(self.images.iter())
            .filter(|reference| !reference.is_empty())
            .cloned()
            .collect()
    }

    /// `updated_at`, else `created_at`, parsed as RFC 3339.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| parse_timestamp(&self.created_at))
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Accepts the identifier as a JSON string or integer.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<WireId>::deserialize(deserializer)?.map(|id| match id {
        WireId::Text(text) => text,
        WireId::Number(number) => number.to_string(),
    }))
}

/// Image lists sometimes carry `null` holes; they are dropped.
fn deserialize_gallery<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Option<String>>>::deserialize(deserializer)?
        .map(|entries| entries.into_iter().flatten().collect()))
}

/// A `null` language entry means the translation is absent.
fn deserialize_translations<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, RawTranslationBlock>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<BTreeMap<String, Option<RawTranslationBlock>>>::deserialize(deserializer)?.map(
            |blocks| {
                blocks
                    .into_iter()
                    .filter_map(|(code, block)| block.map(|block| (code, block)))
                    .collect()
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_language_entry_is_absent() {
        let raw: RawOffer = serde_json::from_value(serde_json::json!({
            "id": "a",
            "translations": {"en": {"title": "Hello"}, "fr": null}
        }))
        .unwrap();
        let translations = raw.translations.unwrap();
        assert_eq!(translations.len(), 1);
        assert!(translations.contains_key("en"));

        let raw: RawOffer =
            serde_json::from_value(serde_json::json!({"id": "a", "translations": null})).unwrap();
        assert!(raw.translations.is_none());
    }

    #[test]
    fn null_gallery_entries_are_dropped() {
        let raw: RawOffer = serde_json::from_value(serde_json::json!({
            "id": "b",
            "images": ["g1", null, "g2"],
            "imageUrls": null,
            "imageComparison": {"galleryImagesFullUrls": [null]}
        }))
        .unwrap();
        assert_eq!(raw.images, Some(vec!["g1".to_string(), "g2".to_string()]));
        assert_eq!(raw.image_urls, None);
        assert_eq!(
            raw.image_comparison.unwrap().gallery_images_full_urls,
            Some(Vec::new())
        );
    }

    #[test]
    fn language_round_trips_codes() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
            assert_eq!(language.to_string(), language.code());
        }
        assert_eq!(" Fr ".parse::<Language>().unwrap(), Language::Fr);
        assert!(matches!(
            "es".parse::<Language>(),
            Err(LanguageError::Unsupported(code)) if code == "es"
        ));
    }

    #[test]
    fn raw_offer_accepts_numeric_id_and_missing_fields() {
        let raw: RawOffer = serde_json::from_str(r#"{"id": 42, "stars": 4.5}"#).unwrap();
        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.stars, Some(4.5));
        assert!(raw.title.is_none());
        assert!(raw.translations.is_none());
    }

    #[test]
    fn raw_offer_ignores_unknown_fields() {
        let raw: RawOffer =
            serde_json::from_str(r#"{"id": "a", "price": 120, "currentLanguage": "fr"}"#).unwrap();
        assert_eq!(raw.id.as_deref(), Some("a"));
    }

    #[test]
    fn translation_block_completeness() {
        let mut block = TranslationBlock {
            title: "T".into(),
            short_description: "S".into(),
            big_description: "B".into(),
            destination: "D".into(),
        };
        assert!(block.is_complete());
        block.destination.clear();
        assert!(!block.is_complete());
        assert_eq!(block.get(TranslationField::Title), "T");
    }

    #[test]
    fn translations_serialize_as_code_map() {
        let translations: Translations = [(Language::Fr, TranslationBlock::default())]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&translations).unwrap();
        assert!(json.get("fr").is_some());
        assert!(json.get("en").is_none());
    }

    #[test]
    fn last_modified_prefers_updated_at() {
        let offer = CanonicalOffer {
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: Some("2024-06-01T12:00:00+02:00".into()),
            ..Default::default()
        };
        let ts = offer.last_modified().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-01T10:00:00+00:00");

        let offer = CanonicalOffer {
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: Some("yesterday".into()),
            ..Default::default()
        };
        assert_eq!(offer.last_modified().unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");

        assert!(CanonicalOffer::default().last_modified().is_none());
    }

    #[test]
    fn all_images_skips_empty_main() {
        let offer = CanonicalOffer {
            images: vec!["g1".into(), "g2".into()],
            ..Default::default()
        };
        assert_eq!(offer.all_images(), vec!["g1".to_string(), "g2".to_string()]);
    }
}
