//! `sitemap.xml` and `robots.txt` for the public site.
use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use ingest::{CanonicalOffer, Language};
use serde::Serialize;

use crate::presentation::offer_href;

/// Landing page sections linked from the sitemap, in page order.
pub const SECTION_ANCHORS: [&str; 5] = ["hero", "offers", "about", "map", "contact"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Every public URL of the site.
///
/// Locale roots come first, then one detail page per available offer per
/// locale, then the landing page section anchors. Offers without a parseable
/// timestamp use `now` as their last modification.
pub fn build_sitemap(
    site_url: &str,
    offers: &[CanonicalOffer],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base = site_url.trim_end_matches('/');
    let mut entries = Vec::new();

    for language in Language::ALL {
        entries.push(SitemapEntry {
            loc: format!("{base}/{language}"),
            lastmod: now,
            changefreq: ChangeFrequency::Weekly,
            priority: 1.0,
        });
    }

    for offer in offers.iter().filter(|offer| offer.available) {
        let lastmod = offer.last_modified().unwrap_or(now);
        for language in Language::ALL {
            entries.push(SitemapEntry {
                loc: format!("{base}{}", offer_href(language, &offer.id)),
                lastmod,
                changefreq: ChangeFrequency::Monthly,
                priority: 0.8,
            });
        }
    }

    for section in SECTION_ANCHORS {
        for language in Language::ALL {
            entries.push(SitemapEntry {
                loc: format!("{base}/{language}#{section}"),
                lastmod: now,
                changefreq: ChangeFrequency::Weekly,
                priority: 0.9,
            });
        }
    }

    entries
}

/// Renders entries as a sitemaps.org `urlset` document.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.changefreq.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Crawl rules: everyone may crawl the pages but not the API or internals;
/// the big engines skip the crawl delay.
pub fn render_robots_txt(site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         Disallow: /private/\n\
         Disallow: /_next/\n\
         Disallow: /temp/\n\
         Disallow: *.json\n\
         Crawl-delay: 1\n\
         \n\
         User-agent: Googlebot\n\
         User-agent: Bingbot\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         Disallow: /private/\n\
         \n\
         Host: {base}\n\
         Sitemap: {base}/sitemap.xml\n"
    )
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn offer(id: &str, available: bool, updated_at: Option<&str>) -> CanonicalOffer {
        CanonicalOffer {
            id: id.into(),
            title: id.into(),
            available,
            updated_at: updated_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn entry_layout() {
        let offers = vec![
            offer("a", true, Some("2025-01-02T03:04:05Z")),
            offer("hidden", false, None),
        ];
        let entries = build_sitemap("https://odyssee.example/", &offers, now());

        // 2 roots + 2 offer pages + 5 anchors * 2 locales
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[0].loc, "https://odyssee.example/en");
        assert_eq!(entries[1].loc, "https://odyssee.example/fr");
        assert_eq!(entries[0].priority, 1.0);

        assert_eq!(entries[2].loc, "https://odyssee.example/en/offers/a");
        assert_eq!(entries[3].loc, "https://odyssee.example/fr/offers/a");
        assert_eq!(entries[2].changefreq, ChangeFrequency::Monthly);
        assert_eq!(entries[2].lastmod.to_rfc3339(), "2025-01-02T03:04:05+00:00");

        assert_eq!(entries[4].loc, "https://odyssee.example/en#hero");
        assert_eq!(entries[13].loc, "https://odyssee.example/fr#contact");
        assert!(entries.iter().all(|e| !e.loc.contains("hidden")));
    }

    #[test]
    fn offers_without_timestamps_use_now() {
        let entries = build_sitemap("https://x", &[offer("a", true, None)], now());
        assert_eq!(entries[2].lastmod, now());
    }

    #[test]
    fn xml_escapes_locations() {
        let entries = vec![SitemapEntry {
            loc: "https://x/en/offers/a&b".into(),
            lastmod: now(),
            changefreq: ChangeFrequency::Weekly,
            priority: 0.9,
        }];
        let xml = render_sitemap_xml(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://x/en/offers/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2025-06-01T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn robots_rules() {
        let robots = render_robots_txt("https://odyssee.example/");
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: *.json\nCrawl-delay: 1\n"));
        assert!(robots.contains("User-agent: Googlebot\nUser-agent: Bingbot\n"));
        assert!(robots.contains("Sitemap: https://odyssee.example/sitemap.xml"));
        assert!(robots.contains("Host: https://odyssee.example\n"));
        assert_eq!(robots.matches("Crawl-delay").count(), 1);
    }
}
