//! Axum router construction.
//!
//! Puzzle handlers and every row of [`RELAY_ROUTES`] are mounted under
//! `/api`. `/health` sits at the root. CORS is open so the frontend can be
//! served from a different origin during development.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::routing::{get, on, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::relay::{self, RELAY_ROUTES, RelayRoute};
use crate::state::AppState;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api";

/// Build the complete Axum router.
///
/// - `GET /health`
/// - `GET /api/status`, `GET /api/repair-bay`, `POST /api/teapot`
/// - one route per [`RELAY_ROUTES`] row, e.g. `POST /api/solution1`
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = RELAY_ROUTES.iter().fold(
        Router::new()
            .route("/status", get(handlers::status))
            .route("/repair-bay", get(handlers::repair_bay))
            .route("/teapot", post(handlers::teapot)),
        mount_relay,
    );

    Router::new()
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve files from `dir` for any path no API route matched.
///
/// Leaves the router untouched when `dir` does not exist, so a missing
/// frontend build never prevents the API from starting.
pub fn with_static_frontend(router: Router, dir: &Path) -> Router {
    if dir.is_dir() {
        router.fallback_service(ServeDir::new(dir))
    } else {
        router
    }
}

fn mount_relay(
    router: Router<Arc<AppState>>,
    route: &'static RelayRoute,
) -> Router<Arc<AppState>> {
    router.route(
        route.inbound_path,
        on(
            route.method.filter(),
            move |State(state): State<Arc<AppState>>,
                  Query(query): Query<BTreeMap<String, String>>,
                  body: Bytes| async move {
                relay::forward(&state, route, &query, &body).await
            },
        ),
    )
}
