//! `AltScore` relay server binary.
//!
//! # Startup Sequence
//!
//! 1. Load `.env` (if present) into the process environment
//! 2. Initialize structured logging (tracing)
//! 3. Load configuration from `altscore.toml` and the environment
//! 4. Build the upstream client and shared state
//! 5. Serve the gateway until `Ctrl-C`

use std::sync::Arc;

use altscore_gateway::{AppState, GatewayConfig, start_server};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the upstream client cannot
/// be built, or the server fails to bind or serve.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env must be loaded before the filter reads RUST_LOG.
    let dotenv = dotenvy::dotenv();

    // 2. Initialize structured logging. LOG_FORMAT=json switches to JSON lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("altscore-server starting");
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to read .env, continuing with process environment"),
    }

    // 3. Load configuration.
    let config = GatewayConfig::load().context("loading configuration")?;
    info!(
        host = config.host,
        port = config.port,
        upstream_timeout_ms = config.upstream_timeout_ms,
        "configuration loaded"
    );

    // 4. Shared state.
    let state = Arc::new(AppState::from_config(&config).context("building upstream client")?);
    info!(upstream = state.upstream.base_url(), "upstream client ready");

    // 5. Serve.
    start_server(&config, state)
        .await
        .context("running gateway server")?;

    Ok(())
}
