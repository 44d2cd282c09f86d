use crate::config::ServerConfig;
use client::OffersClient;
use locale::ResolveConfig;
use std::sync::Arc;

/// Shared application state
///
/// Read-only after startup; every request works on its own fetch.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Offers backend client (shares one pooled HTTP client process-wide)
    pub client: OffersClient,

    /// Translation fallback rules
    pub resolve: ResolveConfig,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> Self {
        let client = OffersClient::new(config.client_config());
        let resolve = config.resolve_config();

        Self {
            config: Arc::new(config),
            client,
            resolve,
        }
    }
}
