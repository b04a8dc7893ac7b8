//! HTTP gateway for the `AltScore` puzzle relay.
//!
//! This crate provides an Axum server that exposes two kinds of endpoint:
//!
//! - **Puzzle endpoints** (`/api/status`, `/api/repair-bay`,
//!   `/api/teapot`) answered locally from [`AppState`]
//! - **Relay endpoints** (`/api/register`, `/api/solution1`, ...) that
//!   validate input, forward it to the upstream scoring API with the
//!   configured `API-KEY`, and pass the upstream answer back
//!
//! # Architecture
//!
//! Relay operations are rows in a static table ([`relay::RELAY_ROUTES`]);
//! the router mounts one route per row and all rows share the single
//! [`relay::forward`] routine. There is no retry: each inbound request
//! produces at most one upstream request.
//!
//! Upstream failures keep their status and body. Transport failures become
//! `500 {"error": "<fallback>"}` using the operation's fixed message.

pub mod config;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod router;
pub mod server;
pub mod state;
pub mod upstream;

// Re-export primary types for convenience.
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
pub use upstream::UpstreamClient;
