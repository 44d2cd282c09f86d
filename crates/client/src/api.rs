use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use ingest::RawOffer;
use once_cell::sync::Lazy;
use reqwest::{header, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::envelope::{extract_offer, extract_offers};
use crate::{build_api_url, ClientConfig, ClientError};

// Global HTTP client with connection pooling
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .pool_max_idle_per_host(32)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "http_client_builder_failed_using_defaults");
            reqwest::Client::new()
        })
});

/// Result of a backend call, as handed to the pages.
///
/// Failures never surface as errors: `success` is `false`, `data` holds the
/// empty value and `message` says what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> FetchOutcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn failed(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            message: Some(message.into()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        FetchOutcome {
            success: self.success,
            data: f(self.data),
            message: self.message,
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    fn from_result(result: Result<T, ClientError>, operation: &'static str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                warn!(operation, error = %err, status = ?err.status(), "backend_call_failed");
                Self::failed(T::default(), err.to_string())
            }
        }
    }
}

/// A contact-form message forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    #[serde(rename = "messageSentAt")]
    pub message_sent_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Builds a submission stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        family_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            family_name: family_name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
            message_sent_at: Utc::now(),
        }
    }

    fn to_payload(&self) -> Value {
        json!({
            "name": self.name,
            "familyName": self.family_name,
            "Email": self.email,
            "phone": self.phone,
            "message": self.message,
            "messageSentAt": self.message_sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Client for the offers backend.
///
/// Cheap to clone; all instances share one pooled HTTP connection set.
#[derive(Debug, Clone)]
pub struct OffersClient {
    config: ClientConfig,
}

impl OffersClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches every offer. Zero offers is a success.
    pub async fn fetch_collection(&self) -> FetchOutcome<Vec<RawOffer>> {
        FetchOutcome::from_result(self.try_fetch_collection().await, "fetch_collection")
    }

    /// Fetches one offer by id.
    ///
    /// When the direct lookup fails, or answers with something that is not
    /// the requested offer, the full collection is scanned instead.
    /// `success` with `data == None` means the offer does not exist.
    pub async fn fetch_by_id(&self, id: &str) -> FetchOutcome<Option<RawOffer>> {
        let id = id.trim();
        match self.try_fetch_by_id(id).await {
            Ok(Some(offer)) => return FetchOutcome::ok(Some(offer)),
            Ok(None) => debug!(offer_id = id, "offer_direct_lookup_missed"),
            Err(err) => debug!(offer_id = id, error = %err, "offer_direct_lookup_failed"),
        }

        info!(offer_id = id, "offer_lookup_falling_back_to_collection");
        self.fetch_collection().await.map(|offers| {
            offers
                .into_iter()
                .find(|offer| offer.id.as_deref().map(str::trim) == Some(id))
        })
    }

    /// Forwards a contact-form message to `POST {base}/contacts`.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> FetchOutcome<()> {
        let result = self
            .post_json("/contacts", submission.to_payload())
            .await
            .map(|_| ());
        FetchOutcome::from_result(result, "submit_contact")
    }

    /// Registers an address with `POST {base}/newspaper`.
    pub async fn subscribe_newsletter(&self, email: &str) -> FetchOutcome<()> {
        let result = self
            .post_json("/newspaper", json!({ "email": email }))
            .await
            .map(|_| ());
        FetchOutcome::from_result(result, "subscribe_newsletter")
    }

    async fn try_fetch_collection(&self) -> Result<Vec<RawOffer>, ClientError> {
        let mut url = self.endpoint_url("/offers")?;
        if self.config.include_translations {
            url.query_pairs_mut()
                .append_pair("includeTranslations", "true");
        }

        let body = self.get_json(url).await?;
        let offers = extract_offers(body);
        debug!(count = offers.len(), "offers_fetched");
        Ok(offers)
    }

    async fn try_fetch_by_id(&self, id: &str) -> Result<Option<RawOffer>, ClientError> {
        let mut url = self.endpoint_url("/offers")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig("base URL cannot carry a path".into()))?
            .push(id);

        let body = self.get_json(url).await?;
        Ok(extract_offer(body, id))
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ClientError> {
        let raw = build_api_url(&self.config.base_url, endpoint);
        Url::parse(&raw).map_err(|e| ClientError::InvalidConfig(format!("{raw}: {e}")))
    }

    fn with_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.timeout_secs {
            Some(secs) => request.timeout(Duration::from_secs(secs)),
            None => request,
        }
    }

    async fn get_json(&self, url: Url) -> Result<Value, ClientError> {
        debug!(%url, "backend_get");
        let request = HTTP_CLIENT
            .get(url)
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::ACCEPT, "application/json");
        let body = send_api_request(self.with_timeout(request)).await?;
        decode_json(&body)
    }

    async fn post_json(&self, endpoint: &str, payload: Value) -> Result<Value, ClientError> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "backend_post");
        let request = HTTP_CLIENT.post(url).json(&payload);
        let body = send_api_request(self.with_timeout(request)).await?;
        // 201 with no body is a normal acknowledgement.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        decode_json(&body)
    }
}

async fn send_api_request(request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }

    Ok(response.bytes().await?.to_vec())
}

/// Strict decode: an empty body is malformed JSON.
fn decode_json(body: &[u8]) -> Result<Value, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}
