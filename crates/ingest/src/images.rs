//! Image field aliasing and image reference helpers.
//!
//! The backend renamed its image fields several times without migrating old
//! records, so one canonical field can arrive under several wire names. Each
//! canonical field has an ordered alias list; the first alias holding a
//! non-empty value wins and the remaining ones are ignored.
//!
//! ```text
//! main image:  mainImage → mainImageUrl → mainImageFullUrl → image
//!              → imageComparison.mainImageFullUrl
//! gallery:     images → imageUrls → imageComparison.galleryImagesFullUrls
//! ```
use crate::types::RawOffer;

/// Wire names for the main image, highest precedence first.
pub const MAIN_IMAGE_ALIASES: [&str; 5] = [
    "mainImage",
    "mainImageUrl",
    "mainImageFullUrl",
    "image",
    "imageComparison.mainImageFullUrl",
];

/// Wire names for the gallery, highest precedence first.
pub const GALLERY_ALIASES: [&str; 3] = [
    "images",
    "imageUrls",
    "imageComparison.galleryImagesFullUrls",
];

const BASE64_JPEG_PREFIX: &str = "data:image/jpeg;base64,";

/// Returns the raw value stored under one main-image alias.
fn main_image_candidate<'a>(raw: &'a RawOffer, alias: &str) -> Option<&'a str> {
    let value = match alias {
        "mainImage" => raw.main_image.as_deref(),
        "mainImageUrl" => raw.main_image_url.as_deref(),
        "mainImageFullUrl" => raw.main_image_full_url.as_deref(),
        "image" => raw.image.as_deref(),
        "imageComparison.mainImageFullUrl" => raw
            .image_comparison
            .as_ref()
            .and_then(|cmp| cmp.main_image_full_url.as_deref()),
        _ => None,
    };
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn gallery_candidate<'a>(raw: &'a RawOffer, alias: &str) -> Option<&'a [String]> {
    let value = match alias {
        "images" => raw.images.as_deref(),
        "imageUrls" => raw.image_urls.as_deref(),
        "imageComparison.galleryImagesFullUrls" => raw
            .image_comparison
            .as_ref()
            .and_then(|cmp| cmp.gallery_images_full_urls.as_deref()),
        _ => None,
    };
    value.filter(|v| !v.is_empty())
}

/// Resolves the main image, returning the winning alias with its value.
pub fn resolve_main_image(raw: &RawOffer) -> Option<(&'static str, String)> {
    MAIN_IMAGE_ALIASES.iter().find_map(|alias| {
        main_image_candidate(raw, alias).map(|value| (*alias, value.to_string()))
    })
}

/// Resolves the gallery, returning the winning alias with its entries.
///
/// Blank entries inside the winning list are dropped.
pub fn resolve_gallery(raw: &RawOffer) -> Option<(&'static str, Vec<String>)> {
    GALLERY_ALIASES.iter().find_map(|alias| {
        gallery_candidate(raw, alias).map(|entries| {
            let cleaned = entries
                .iter()
                .map(|entry| entry.trim())
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
            (*alias, cleaned)
        })
    })
}

/// Turns an image reference into something a page can render.
///
/// Data URLs and absolute URLs pass through, bare base64 gets a JPEG data-URL
/// prefix, and an empty reference stays empty.
///
/// ```rust
/// use ingest::image_src;
///
/// assert_eq!(image_src("https://cdn.example.com/a.jpg"), "https://cdn.example.com/a.jpg");
/// assert_eq!(image_src("/9j/4AAQ"), "data:image/jpeg;base64,/9j/4AAQ");
/// assert_eq!(image_src(""), "");
/// ```
pub fn image_src(reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty()
        || reference.starts_with("data:image/")
        || reference.starts_with("http")
    {
        reference.to_string()
    } else {
        format!("{BASE64_JPEG_PREFIX}{reference}")
    }
}
