//! Odyssee Server - HTTP API for the Odyssee travel offers site
//!
//! This crate serves the data the bilingual site renders and takes in the
//! visitor forms:
//!
//! - **Offers**: Localized listing cards and detail pages, fetched fresh from
//!   the offers backend on every request
//! - **Submissions**: Contact form and newsletter intake with validation,
//!   optionally forwarded to the backend
//! - **Crawlers**: `sitemap.xml` and `robots.txt`
//! - **Health**: Liveness and readiness probes
//!
//! The server keeps no data. A backend outage degrades offer routes to empty
//! results instead of errors.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /api/offers?locale=fr&q=...` - Offers section
//! - `GET /api/offers/{id}?locale=fr` - Offer detail
//! - `POST /api/contacts` - Contact form
//! - `POST /api/newsletter` - Newsletter subscription
//! - `GET /api/analytics` - Analytics settings
//! - `GET /sitemap.xml`, `GET /robots.txt`
//!
//! # Configuration
//!
//! `server.{toml,yaml,json}` if present, overridden by `ODYSSEE__*`
//! environment variables (e.g. `ODYSSEE__API_BASE_URL`,
//! `ODYSSEE__ANALYTICS__TRACKING_ID`). A `.env` file is read first.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AnalyticsConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
