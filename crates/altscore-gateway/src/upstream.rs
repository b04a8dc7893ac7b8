//! HTTP client for the upstream scoring API.
//!
//! [`UpstreamClient`] owns one pooled `reqwest` client plus the base URL and
//! API key. It performs exactly one request per call; there is no retry.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::set_content_type;

/// Header carrying the static upstream credential.
pub const API_KEY_HEADER: &str = "API-KEY";

/// A fully validated outbound call, ready to send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutboundCall {
    /// Query parameters, in declaration order.
    pub query: Vec<(&'static str, String)>,
    /// JSON body, if the operation sends one.
    pub body: Option<serde_json::Value>,
}

/// What upstream sent back, independent of success or failure.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Upstream status code.
    pub status: StatusCode,
    /// Upstream `content-type`, if declared.
    pub content_type: Option<HeaderValue>,
    /// Raw response body.
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        set_content_type(&mut response, self.content_type);
        response
    }
}

/// Client for the upstream scoring API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Create a client for `base_url` that attaches `api_key` on
    /// authenticated calls and gives up on any request after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// The base URL every upstream path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an upstream path. An empty path targets the base
    /// resource itself.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send one request upstream and collect the full response.
    ///
    /// Non-success statuses are returned as `Ok`; only transport failures
    /// (DNS, connect, timeout, truncated body) are errors.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error when no complete response was received.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        authenticated: bool,
        call: &OutboundCall,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let mut request = self.client.request(method, self.url_for(path));
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if authenticated {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
