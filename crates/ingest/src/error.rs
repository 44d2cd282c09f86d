//! Error types produced by the ingest crate.
//!
//! Normalization is deliberately forgiving: missing optional data is defaulted,
//! never rejected. The only record-level failure is a missing identifier.
use thiserror::Error;

/// Errors that can occur while normalizing a raw offer record.
///
/// The enum is `#[non_exhaustive]`; callers should keep a catch-all arm.
///
/// # Examples
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::MissingId;
/// assert_eq!(err.to_string(), "offer record has no identifier");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The record carried no `id`, or only whitespace.
    ///
    /// Collection-level callers skip such records; single-record callers
    /// treat them as invalid.
    #[error("offer record has no identifier")]
    MissingId,

    /// The record could not be decoded into a [`RawOffer`](crate::RawOffer).
    #[error("invalid offer record: {0}")]
    InvalidRecord(String),
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::InvalidRecord(err.to_string())
    }
}

/// Error returned when a language code is outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("unsupported language code: {0:?}")]
    Unsupported(String),
}
