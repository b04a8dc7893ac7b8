//! Handlers that answer locally, without contacting upstream.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/status` | Pick and report a damaged system |
//! | `GET` | `/api/repair-bay` | HTML page with the repair code |
//! | `POST` | `/api/teapot` | Always `418` |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use altscore_puzzle::{DamagedSystemReport, render_repair_page};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::info;

use crate::error::GatewayError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Choose a new damaged system at random and report it.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<DamagedSystemReport> {
    let report = state.puzzle.select().await;
    info!(damaged_system = %report.damaged_system, "damaged system selected");
    Json(report)
}

// ---------------------------------------------------------------------------
// GET /api/repair-bay
// ---------------------------------------------------------------------------

/// Render the repair page for the last reported damaged system.
///
/// Fails with `400` until `/api/status` has been called at least once.
pub async fn repair_bay(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, GatewayError> {
    let code = state.puzzle.repair_code().await?;
    Ok(Html(render_repair_page(code)))
}

// ---------------------------------------------------------------------------
// POST /api/teapot
// ---------------------------------------------------------------------------

/// Refuse to brew coffee.
pub async fn teapot() -> impl IntoResponse {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot")
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
