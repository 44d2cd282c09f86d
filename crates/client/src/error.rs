use thiserror::Error;

/// Errors raised inside the offers client.
///
/// These never cross the public fetch boundary: [`OffersClient`](crate::OffersClient)
/// folds them into a failed [`FetchOutcome`](crate::FetchOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The base URL (or a URL built from it) could not be parsed.
    #[error("invalid client config: {0}")]
    InvalidConfig(String),
    /// Connect, DNS or timeout failure before a response arrived.
    #[error("HTTP request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
