//! Case-insensitive text search over localized offer fields.
use ingest::{Language, TranslationField};

use crate::resolve::{localized_text, Localizable};

/// Offers whose localized text contains `query` in any of `fields`.
///
/// An empty `fields` slice searches all four translatable fields. An empty
/// query matches everything. Matching is case-insensitive and uses the same
/// per-field fallback as [`localized_text`].
pub fn search_offers<'a, T>(
    offers: &'a [T],
    query: &str,
    locale: Language,
    fields: &[TranslationField],
) -> Vec<&'a T>
where
    T: Localizable,
{
    let needle = query.trim().to_lowercase();
    let fields = if fields.is_empty() {
        &TranslationField::ALL[..]
    } else {
        fields
    };

    offers
        .iter()
        .filter(|offer| {
            fields.iter().any(|field| {
                localized_text(*offer, locale, *field)
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .collect()
}
