//! Shared application state for the gateway.
//!
//! [`AppState`] is built once at startup, wrapped in [`Arc`](std::sync::Arc),
//! and injected into every handler through Axum's `State` extractor.

use altscore_puzzle::DamagedSystemState;

use crate::config::GatewayConfig;
use crate::upstream::UpstreamClient;

/// Shared state for the Axum application.
#[derive(Debug)]
pub struct AppState {
    /// Last reported damaged system.
    pub puzzle: DamagedSystemState,
    /// Pooled client for the upstream scoring API.
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Create state around an existing upstream client, with no damaged
    /// system selected yet.
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            puzzle: DamagedSystemState::new(),
            upstream,
        }
    }

    /// Build state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(
            &config.upstream_base_url,
            &config.api_key,
            config.upstream_timeout(),
        )?;
        Ok(Self::new(upstream))
    }
}
