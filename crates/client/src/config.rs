use serde::{Deserialize, Serialize};

/// Where the offers backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend API, e.g. `https://api.example.com/api`.
    pub base_url: String,
    /// Ask the backend to embed translation blocks in collection responses.
    pub include_translations: bool,
    /// Request timeout in seconds. `None` leaves reqwest's default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            include_translations: false,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_include_translations(mut self, include: bool) -> Self {
        self.include_translations = include;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Joins a base URL and an endpoint path with exactly one `/` between them.
///
/// ```rust
/// use client::build_api_url;
///
/// assert_eq!(build_api_url("http://x/api/", "offers"), "http://x/api/offers");
/// assert_eq!(build_api_url("http://x/api", "/offers"), "http://x/api/offers");
/// ```
pub fn build_api_url(base: &str, endpoint: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    }
}
