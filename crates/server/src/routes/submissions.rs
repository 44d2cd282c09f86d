//! Contact form and newsletter intake.
//!
//! Both routes validate and acknowledge. Forwarding to the backend is opt-in
//! (`forward_submissions`) and never changes the answer the visitor gets.
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use client::ContactSubmission;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// True for `local@domain.tld`-shaped addresses.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Contact form body. `firstName`/`lastName` are accepted for older forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(alias = "firstName")]
    pub name: Option<String>,
    #[serde(alias = "lastName")]
    pub family_name: Option<String>,
    #[serde(alias = "Email")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsletterRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    pub success: bool,
    pub message: &'static str,
    pub email: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ContactRequest {
    /// Checks required fields and the email shape.
    pub fn validate(&self) -> ServerResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ServerError::MissingFields(missing.join(", ")));
        }

        match present(&self.email) {
            Some(email) if is_valid_email(email) => Ok(()),
            _ => Err(ServerError::InvalidEmail),
        }
    }

    fn to_submission(&self) -> ContactSubmission {
        let field = |value: &Option<String>| present(value).unwrap_or_default().to_string();
        ContactSubmission::new(
            field(&self.name),
            field(&self.family_name),
            field(&self.email),
            field(&self.phone),
            field(&self.message),
        )
    }
}

/// `POST /api/contacts`
pub async fn submit_contact(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = body?;
    request.validate()?;

    let id = format!("contact_{}", chrono::Utc::now().timestamp_millis());
    tracing::info!(contact_id = %id, "Contact form submission accepted");

    if state.config.forward_submissions {
        let outcome = state.client.submit_contact(&request.to_submission()).await;
        if !outcome.success {
            tracing::warn!(
                contact_id = %id,
                error = outcome.message.as_deref().unwrap_or_default(),
                "Contact forwarding failed"
            );
        }
    }

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact form submitted successfully",
        id,
    }))
}

/// `POST /api/newsletter`
pub async fn subscribe_newsletter(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewsletterRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = body?;
    let email = present(&request.email)
        .ok_or_else(|| ServerError::MissingFields("email".into()))?
        .to_string();
    if !is_valid_email(&email) {
        return Err(ServerError::InvalidEmail);
    }

    tracing::info!("Newsletter subscription accepted");

    if state.config.forward_submissions {
        let outcome = state.client.subscribe_newsletter(&email).await;
        if !outcome.success {
            tracing::warn!(
                error = outcome.message.as_deref().unwrap_or_default(),
                "Newsletter forwarding failed"
            );
        }
    }

    Ok(Json(NewsletterResponse {
        success: true,
        message: "Successfully subscribed to newsletter",
        email,
    }))
}
