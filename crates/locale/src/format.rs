//! Display formatting for offer numbers.
//!
//! Pure functions: same input, same string, no hidden state.
use ingest::Language;

/// Glyph appended by [`format_stars`] when an icon is requested.
pub const STAR_GLYPH: &str = "⭐";

/// Formats a day count with the locale's unit, singular only for exactly one.
///
/// ```rust
/// use ingest::Language;
/// use locale::format_duration;
///
/// assert_eq!(format_duration(1, Language::En), "1 day");
/// assert_eq!(format_duration(0, Language::En), "0 days");
/// assert_eq!(format_duration(5, Language::Fr), "5 jours");
/// ```
pub fn format_duration(days: i64, locale: Language) -> String {
    let (singular, plural) = match locale {
        Language::En => ("day", "days"),
        Language::Fr => ("jour", "jours"),
    };
    let unit = if days == 1 { singular } else { plural };
    format!("{days} {unit}")
}

/// Formats a star rating, optionally followed by [`STAR_GLYPH`].
///
/// Whole values print without a decimal part.
///
/// ```rust
/// use locale::format_stars;
///
/// assert_eq!(format_stars(4.0, true), "4 ⭐");
/// assert_eq!(format_stars(4.5, false), "4.5");
/// ```
pub fn format_stars(value: f64, show_icon: bool) -> String {
    if show_icon {
        format!("{value} {STAR_GLYPH}")
    } else {
        value.to_string()
    }
}
