//! Page-ready offer data: listing cards and the detail page.
//!
//! Everything here is assembled from a [`FetchOutcome`] and never fails. A
//! dead backend renders the "no offers" branch, a missing offer renders the
//! not-found page.
use client::FetchOutcome;
use ingest::{image_src, CanonicalOffer, Language, RawOffer};
use locale::{
    available_languages, format_duration, format_stars, resolve_with, search_offers,
    LocalizedOfferView, ResolveConfig,
};
use serde::Serialize;
use tracing::debug;

use crate::{load_offer, load_offers};

/// Brand suffix appended to detail page titles.
pub const SITE_NAME: &str = "Odyssee Travel Services";

/// One offer as shown in the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCard {
    pub id: String,
    pub title: String,
    /// Short description, else the big one.
    pub description: String,
    /// Rating with the star glyph, e.g. `"4 ⭐"`.
    pub stars: String,
    /// Duration in the page locale, e.g. `"3 jours"`.
    pub duration: String,
    pub location: String,
    /// Renderable image source (URL or `data:` URL), empty when the offer has none.
    pub image: String,
    /// Language the text is actually in.
    pub current_language: Language,
    pub href: String,
}

impl OfferCard {
    /// Builds a card from a localized view. `locale` is the page locale and
    /// drives the duration unit and the link, whatever language the text
    /// fell back to.
    pub fn from_view(view: &LocalizedOfferView, locale: Language) -> Self {
        let offer = view.offer();
        let description = if view.short_description().is_empty() {
            view.big_description()
        } else {
            view.short_description()
        };

        Self {
            id: view.id().to_string(),
            title: view.title().to_string(),
            description: description.to_string(),
            stars: format_stars(offer.stars, true),
            duration: format_duration(offer.duration, locale),
            location: view.destination().to_string(),
            image: card_image(offer),
            current_language: view.current_language,
            href: offer_href(locale, view.id()),
        }
    }
}

/// The offers section of the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OffersSection {
    /// Nothing to show: the fetch failed or no offer is available.
    Empty {
        locale: Language,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Offers {
        locale: Language,
        cards: Vec<OfferCard>,
    },
}

impl OffersSection {
    /// Available offers from `outcome`, localized and formatted for `locale`.
    pub fn assemble(
        outcome: FetchOutcome<Vec<RawOffer>>,
        locale: Language,
        cfg: &ResolveConfig,
    ) -> Self {
        Self::assemble_matching(outcome, locale, cfg, "")
    }

    /// Like [`assemble`](Self::assemble), keeping only offers whose localized
    /// text contains `query`. An empty query keeps everything.
    pub fn assemble_matching(
        outcome: FetchOutcome<Vec<RawOffer>>,
        locale: Language,
        cfg: &ResolveConfig,
        query: &str,
    ) -> Self {
        let offers = match load_offers(outcome) {
            Ok(offers) => offers,
            Err(err) => {
                return OffersSection::Empty {
                    locale,
                    message: Some(err.to_string()),
                };
            }
        };

        let available: Vec<CanonicalOffer> =
            offers.into_iter().filter(|offer| offer.available).collect();
        let cards: Vec<OfferCard> = search_offers(&available, query, locale, &[])
            .into_iter()
            .map(|offer| OfferCard::from_view(&resolve_with(offer, locale, cfg), locale))
            .collect();

        debug!(
            locale = %locale,
            available = available.len(),
            shown = cards.len(),
            "offers_section_assembled"
        );

        if cards.is_empty() {
            OffersSection::Empty {
                locale,
                message: None,
            }
        } else {
            OffersSection::Offers { locale, cards }
        }
    }

    pub fn cards(&self) -> &[OfferCard] {
        match self {
            OffersSection::Empty { .. } => &[],
            OffersSection::Offers { cards, .. } => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }
}

/// `<title>`, description and preview image of a detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Full view of one offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    pub id: String,
    pub title: String,
    pub short_description: String,
    /// Big description, else the short one.
    pub big_description: String,
    pub destination: String,
    pub duration: String,
    pub stars: String,
    /// Every image, main first, as renderable sources.
    pub images: Vec<String>,
    pub available: bool,
    pub current_language: Language,
    pub available_languages: Vec<Language>,
    pub back_href: String,
    pub contact_href: String,
    pub meta: PageMeta,
}

/// Outcome of a detail page lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPage {
    Found(Box<OfferDetail>),
    NotFound,
}

impl DetailPage {
    pub fn found(&self) -> Option<&OfferDetail> {
        match self {
            DetailPage::Found(detail) => Some(detail),
            DetailPage::NotFound => None,
        }
    }
}

impl OfferDetail {
    /// Assembles the detail page for a by-id lookup.
    ///
    /// A failed fetch, a missing offer and an offer without an id all land
    /// on [`DetailPage::NotFound`].
    pub fn assemble(
        lookup: FetchOutcome<Option<RawOffer>>,
        locale: Language,
        cfg: &ResolveConfig,
    ) -> DetailPage {
        match load_offer(lookup) {
            Ok(Some(offer)) => DetailPage::Found(Box::new(Self::from_offer(&offer, locale, cfg))),
            Ok(None) => DetailPage::NotFound,
            Err(err) => {
                debug!(error = %err, "offer_detail_unavailable");
                DetailPage::NotFound
            }
        }
    }

    pub fn from_offer(offer: &CanonicalOffer, locale: Language, cfg: &ResolveConfig) -> Self {
        let view = resolve_with(offer, locale, cfg);
        let images: Vec<String> = offer.all_images().iter().map(|r| image_src(r)).collect();

        let short_description = view.short_description().to_string();
        let big_description = if view.big_description().is_empty() {
            short_description.clone()
        } else {
            view.big_description().to_string()
        };

        let meta = PageMeta {
            title: format!("{} - {SITE_NAME}", view.title()),
            description: if short_description.is_empty() {
                big_description.clone()
            } else {
                short_description.clone()
            },
            image: images.first().cloned(),
        };

        Self {
            id: offer.id.clone(),
            title: view.title().to_string(),
            short_description,
            big_description,
            destination: view.destination().to_string(),
            duration: format_duration(offer.duration, locale),
            stars: format_stars(offer.stars, true),
            images,
            available: offer.available,
            current_language: view.current_language,
            available_languages: available_languages(offer),
            back_href: format!("/{locale}#offers"),
            contact_href: format!("/{locale}#contact"),
            meta,
        }
    }
}

/// Link to an offer's detail page under a locale prefix.
///
/// The id is percent-encoded as one path segment.
pub fn offer_href(locale: Language, id: &str) -> String {
    format!("/{locale}/offers/{}", urlencoding::encode(id))
}

fn card_image(offer: &CanonicalOffer) -> String {
    if offer.main_image.is_empty() {
        offer.images.first().map(|r| image_src(r)).unwrap_or_default()
    } else {
        image_src(&offer.main_image)
    }
}
