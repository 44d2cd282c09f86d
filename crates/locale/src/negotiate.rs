//! Locale negotiation for incoming requests.
//!
//! Precedence mirrors the site routing: an explicit locale (query parameter
//! or `/{locale}/...` path prefix) wins, then `Accept-Language`, then
//! [`Language::DEFAULT`].
use ingest::Language;

/// The requested language when supported, otherwise the default.
///
/// ```rust
/// use ingest::Language;
/// use locale::negotiate;
///
/// assert_eq!(negotiate(Some("fr")), Language::Fr);
/// assert_eq!(negotiate(Some("de")), Language::En);
/// assert_eq!(negotiate(None), Language::En);
/// ```
pub fn negotiate(requested: Option<&str>) -> Language {
    requested
        .and_then(|code| code.parse().ok())
        .unwrap_or(Language::DEFAULT)
}

/// First supported language in an `Accept-Language` header, by q-value.
///
/// Region subtags are ignored (`fr-CA` counts as `fr`). Entries with `q=0`
/// are refused. Returns `None` when nothing supported is listed.
pub fn from_accept_language(header: &str) -> Option<Language> {
    let mut candidates: Vec<(f32, usize, Language)> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, entry)| {
            let mut parts = entry.trim().split(';');
            let tag = parts.next()?.trim();
            let primary = tag.split(['-', '_']).next()?;
            let language = primary.parse::<Language>().ok()?;
            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((quality, position, language))
        })
        .collect();

    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    candidates.first().map(|(_, _, language)| *language)
}

/// Locale named by the first path segment, e.g. `/fr/offers/abc`.
pub fn locale_from_path(path: &str) -> Option<Language> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| segment.len() == 2)
        .and_then(|segment| segment.parse().ok())
}
