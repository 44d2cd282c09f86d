//! Offers backend client
//!
//! Talks to the REST backend that owns the offer catalogue and the contact
//! and newsletter inboxes. Everything here is async and built on one shared,
//! pooled `reqwest` client.
//!
//! ## The contract
//!
//! Fetches never return `Err`. A dead backend, a 500 or a body that is not
//! JSON all come back as a [`FetchOutcome`] with `success: false` and an
//! empty payload, so a page can always render something. Zero offers is a
//! success, not a failure.
//!
//! The backend has answered with a few different envelopes over the years;
//! [`extract_offers`] knows all of them.
//!
//! ## Quick example
//!
//! ```no_run
//! use client::{ClientConfig, OffersClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OffersClient::new(
//!         ClientConfig::new("https://api.example.com/api").with_include_translations(true),
//!     );
//!
//!     let outcome = client.fetch_collection().await;
//!     if outcome.success {
//!         println!("{} offers", outcome.data.len());
//!     }
//! }
//! ```
//!
//! No retries, no cache: every call hits the network.

mod api;
mod config;
mod envelope;
mod error;

pub use crate::api::{ContactSubmission, FetchOutcome, OffersClient};
pub use crate::config::{build_api_url, ClientConfig};
pub use crate::envelope::{extract_offer, extract_offers};
pub use crate::error::ClientError;
