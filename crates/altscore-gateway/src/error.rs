//! Error types for the gateway request path.
//!
//! [`GatewayError`] covers every way a request can fail once it has been
//! routed. Each variant knows how to render itself via
//! [`IntoResponse`](axum::response::IntoResponse), so handlers can return
//! `Result<_, GatewayError>` and propagate with `?`.

use altscore_puzzle::PuzzleError;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Errors that terminate a gateway request.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A puzzle step was invoked out of order.
    #[error("precondition failed: {0}")]
    PreconditionFailed(#[from] PuzzleError),

    /// The inbound request was missing a field or carried the wrong type.
    /// Raised before any upstream call is made.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upstream API answered with a non-success status.
    #[error("upstream returned {status}")]
    Upstream {
        /// Status code returned by upstream.
        status: StatusCode,
        /// Upstream `content-type`, if any.
        content_type: Option<HeaderValue>,
        /// Raw upstream error body.
        body: Bytes,
        /// Message used when upstream sent no body.
        fallback: &'static str,
    },

    /// The upstream API could not be reached or its response could not be
    /// read (DNS, connect, timeout).
    #[error("upstream unreachable for {operation}: {reason}")]
    UpstreamUnreachable {
        /// Relay operation that failed.
        operation: &'static str,
        /// Message returned to the caller.
        fallback: &'static str,
        /// Transport error description (logged, never returned).
        reason: String,
    },
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::PreconditionFailed(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            Self::Validation(message) => error_envelope(StatusCode::BAD_REQUEST, &message),
            Self::Upstream {
                status,
                content_type,
                body,
                fallback,
            } => {
                if body.is_empty() {
                    return error_envelope(status, fallback);
                }
                let mut response = (status, body).into_response();
                set_content_type(&mut response, content_type);
                response
            }
            Self::UpstreamUnreachable { fallback, .. } => {
                error_envelope(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

/// Render `{"error": message}` with the given status.
fn error_envelope(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    (status, axum::Json(body)).into_response()
}

/// Replace the response `content-type` with the upstream one, or drop it
/// when upstream did not declare one.
pub(crate) fn set_content_type(response: &mut Response, content_type: Option<HeaderValue>) {
    let headers = response.headers_mut();
    match content_type {
        Some(value) => {
            headers.insert(CONTENT_TYPE, value);
        }
        None => {
            headers.remove(CONTENT_TYPE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    #[tokio::test]
    async fn precondition_is_plain_text_400() {
        let response = GatewayError::from(PuzzleError::NoDamagedSystem).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn validation_uses_error_envelope() {
        let response =
            GatewayError::Validation("speed is required and must be a number".to_owned())
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "speed is required and must be a number");
    }

    #[tokio::test]
    async fn upstream_without_body_falls_back_to_message() {
        let response = GatewayError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            content_type: None,
            body: Bytes::new(),
            fallback: "Failed to fetch rolodex data",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to fetch rolodex data");
    }

    #[tokio::test]
    async fn unreachable_hides_transport_reason() {
        let response = GatewayError::UpstreamUnreachable {
            operation: "measurement",
            fallback: "Failed to fetch measurement data",
            reason: "connection refused".to_owned(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "Failed to fetch measurement data"}));
    }
}
