//! Gateway HTTP server lifecycle.
//!
//! Provides [`start_server`], which binds the listener, mounts the router
//! (plus the static frontend when present), and serves until `Ctrl-C`.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::router::{build_router, with_static_frontend};
use crate::state::AppState;

/// Errors that can occur when starting or running the gateway server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Start the gateway HTTP server.
///
/// Serves requests until `Ctrl-C` is received, then drains in-flight
/// requests and returns `Ok(())`.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid, the listener cannot
/// bind, or the server hits a fatal I/O error.
pub async fn start_server(config: &GatewayConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);
    let router = if config.static_dir.is_dir() {
        info!(dir = %config.static_dir.display(), "serving static frontend");
        with_static_frontend(router, &config.static_dir)
    } else {
        warn!(
            dir = %config.static_dir.display(),
            "static frontend directory not found, serving API only"
        );
        router
    };

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler, shutdown only by kill");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
