//! Configuration types for translation resolution.
//!
//! [`ResolveConfig`] decides what happens when the requested locale has no
//! usable translation block.
//!
//! # Examples
//!
//! ```rust
//! use locale::{FallbackMode, ResolveConfig};
//!
//! let config = ResolveConfig::default();
//! assert_eq!(config.fallback, FallbackMode::WholeOffer);
//!
//! let lenient = ResolveConfig {
//!     fallback: FallbackMode::PerField,
//!     ..Default::default()
//! };
//! assert_eq!(lenient.fallback, FallbackMode::PerField);
//! ```
use ingest::Language;
use serde::{Deserialize, Serialize};

/// How translated text replaces canonical text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// The translation block replaces all four display fields at once, and
    /// only when every one of them is non-empty. Otherwise nothing is
    /// translated.
    #[default]
    WholeOffer,
    /// Each display field uses its translation when non-empty and the
    /// canonical value otherwise.
    PerField,
}

/// Runtime configuration for the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    pub fallback: FallbackMode,
    /// Language tagged on views that kept their canonical text.
    pub default_language: Language,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackMode::WholeOffer,
            default_language: Language::DEFAULT,
        }
    }
}
