use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Tracker settings the page needs to boot analytics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    pub debug: bool,
    pub anonymize_ip: bool,
    pub send_page_view: bool,
    pub cookie_flags: &'static str,
}

/// `GET /api/analytics`
pub async fn analytics_config(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let analytics = &state.config.analytics;
    Json(AnalyticsSettings {
        enabled: analytics.enabled(),
        tracking_id: analytics.tracking_id.clone(),
        debug: analytics.debug,
        anonymize_ip: true,
        // Page views are sent by the page itself after navigation.
        send_page_view: false,
        cookie_flags: "SameSite=None;Secure",
    })
}
