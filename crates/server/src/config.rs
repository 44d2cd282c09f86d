use client::ClientConfig;
use locale::{FallbackMode, ResolveConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Analytics switches handed to the page.
///
/// Tracking is on in production, or when forced, or in debug mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Measurement id the page loads the tracker with.
    pub tracking_id: Option<String>,
    /// Running a production deployment.
    pub production: bool,
    /// Track outside production.
    pub force_enable: bool,
    /// Verbose client-side analytics logging. Implies tracking.
    pub debug: bool,
}

impl AnalyticsConfig {
    pub fn enabled(&self) -> bool {
        self.production || self.force_enable || self.debug
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base URL of the offers backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for backend calls; reqwest's default when unset
    #[serde(default)]
    pub api_timeout_secs: Option<u64>,

    /// Public site URL used in the sitemap and robots.txt
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Ask the backend for translation blocks
    #[serde(default = "default_true")]
    pub include_translations: bool,

    /// Forward contact and newsletter submissions to the backend
    #[serde(default)]
    pub forward_submissions: bool,

    /// How incomplete translations are resolved
    #[serde(default)]
    pub fallback: FallbackMode,

    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            api_base_url: default_api_base_url(),
            api_timeout_secs: None,
            site_url: default_site_url(),
            include_translations: default_true(),
            forward_submissions: false,
            fallback: FallbackMode::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `ODYSSEE__*` environment variables, later sources winning.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("ODYSSEE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.analytics.tracking_id.is_none() {
            tracing::warn!("No analytics tracking id configured");
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            include_translations: self.include_translations,
            timeout_secs: self.api_timeout_secs,
        }
    }

    pub fn resolve_config(&self) -> ResolveConfig {
        ResolveConfig {
            fallback: self.fallback,
            ..ResolveConfig::default()
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_site_url() -> String {
    "https://www.odysseetravelservices.com".to_string()
}
