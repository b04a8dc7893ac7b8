//! Table-driven relay to the upstream scoring API.
//!
//! Every relay operation is one [`RelayRoute`] row in [`RELAY_ROUTES`].
//! A single routine, [`forward`], serves all of them:
//!
//! 1. validate the inbound body or query against the row's input shape,
//! 2. build the outbound call (path, query, body, `API-KEY` header),
//! 3. send it once,
//! 4. pass a 2xx response through untouched, or map the failure onto
//!    [`GatewayError`].
//!
//! Validation always completes before any network I/O, so malformed input
//! never costs an upstream request.
//!
//! | Inbound | Method | Upstream path | Auth |
//! |---------|--------|---------------|------|
//! | `/register` | `POST` | `/v1/register` | no |
//! | `/leaderboard` | `GET` | `/v1/leaderboard` | no |
//! | `/home` | `GET` | base URL | no |
//! | `/measurement` | `GET` | `/v1/s1/e1/resources/measurement` | yes |
//! | `/solution1` | `POST` | `/v1/s1/e1/solution` | yes |
//! | `/starts` | `GET` | `/v1/s1/e2/resources/stars` | yes |
//! | `/solution2` | `POST` | `/v1/s1/e2/solution` | yes |
//! | `/rolodex` | `GET` | `/v1/s1/e3/resources/oracle-rolodex` | yes |
//! | `/solution3` | `POST` | `/v1/s1/e3/solution` | yes |

use std::collections::BTreeMap;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::MethodFilter;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, info_span, warn};

use crate::error::GatewayError;
use crate::state::AppState;
use crate::upstream::OutboundCall;

// ---------------------------------------------------------------------------
// Route table types
// ---------------------------------------------------------------------------

/// HTTP method of a relay operation. Inbound and outbound always match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl RelayMethod {
    /// The outbound request method.
    pub const fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
        }
    }

    /// The inbound route filter.
    pub const fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
        }
    }
}

/// Declared JSON type of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON number (integer or float).
    Number,
    /// Any JSON string.
    String,
}

impl FieldKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::String => "a string",
        }
    }

    fn matches_json(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
        }
    }

    fn matches_query(self, raw: &str) -> bool {
        match self {
            Self::Number => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::String => true,
        }
    }
}

/// A required field in a JSON request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyField {
    /// Field name, identical inbound and outbound.
    pub name: &'static str,
    /// Required JSON type.
    pub kind: FieldKind,
}

/// An optional query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    /// Parameter name, identical inbound and outbound.
    pub name: &'static str,
    /// Type the raw value must parse as, when present.
    pub kind: FieldKind,
    /// Value forwarded when the caller omits the parameter or sends it
    /// blank. `None` means the parameter is simply left off the outbound
    /// call.
    pub default: Option<&'static str>,
}

/// Shape of the input a relay operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayInput {
    /// Nothing is read from the request.
    None,
    /// The JSON body is forwarded as-is.
    PassThroughBody,
    /// Only the listed fields are validated and forwarded.
    BodyFields(&'static [BodyField]),
    /// Only the listed query parameters are validated and forwarded.
    QueryParams(&'static [QueryParam]),
}

/// One inbound endpoint mapped onto one upstream resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayRoute {
    /// Short operation name used in logs.
    pub operation: &'static str,
    /// Path under the `/api` prefix.
    pub inbound_path: &'static str,
    /// Method used both inbound and outbound.
    pub method: RelayMethod,
    /// Path appended to the upstream base URL. Empty for the base resource.
    pub upstream_path: &'static str,
    /// Whether the `API-KEY` header is attached.
    pub authenticated: bool,
    /// Accepted input shape.
    pub input: RelayInput,
    /// Error message used when upstream gives nothing better.
    pub fallback_error: &'static str,
}

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

/// Every relay operation served by the gateway.
pub const RELAY_ROUTES: &[RelayRoute] = &[
    RelayRoute {
        operation: "register",
        inbound_path: "/register",
        method: RelayMethod::Post,
        upstream_path: "/v1/register",
        authenticated: false,
        input: RelayInput::PassThroughBody,
        fallback_error: "Failed to register",
    },
    RelayRoute {
        operation: "leaderboard",
        inbound_path: "/leaderboard",
        method: RelayMethod::Get,
        upstream_path: "/v1/leaderboard",
        authenticated: false,
        input: RelayInput::None,
        fallback_error: "Failed to fetch leaderboard data",
    },
    RelayRoute {
        operation: "home",
        inbound_path: "/home",
        method: RelayMethod::Get,
        upstream_path: "",
        authenticated: false,
        input: RelayInput::None,
        fallback_error: "Failed to fetch home data",
    },
    RelayRoute {
        operation: "measurement",
        inbound_path: "/measurement",
        method: RelayMethod::Get,
        upstream_path: "/v1/s1/e1/resources/measurement",
        authenticated: true,
        input: RelayInput::None,
        fallback_error: "Failed to fetch measurement data",
    },
    RelayRoute {
        operation: "solution1",
        inbound_path: "/solution1",
        method: RelayMethod::Post,
        upstream_path: "/v1/s1/e1/solution",
        authenticated: true,
        input: RelayInput::BodyFields(&[BodyField {
            name: "speed",
            kind: FieldKind::Number,
        }]),
        fallback_error: "Failed to post speed data",
    },
    RelayRoute {
        operation: "stars",
        inbound_path: "/starts",
        method: RelayMethod::Get,
        upstream_path: "/v1/s1/e2/resources/stars",
        authenticated: true,
        input: RelayInput::QueryParams(&[QueryParam {
            name: "page",
            kind: FieldKind::Number,
            default: Some("1"),
        }]),
        fallback_error: "Failed to fetch stars data",
    },
    RelayRoute {
        operation: "solution2",
        inbound_path: "/solution2",
        method: RelayMethod::Post,
        upstream_path: "/v1/s1/e2/solution",
        authenticated: true,
        input: RelayInput::BodyFields(&[BodyField {
            name: "average_resonance",
            kind: FieldKind::Number,
        }]),
        fallback_error: "Failed to post average_resonance data",
    },
    RelayRoute {
        operation: "rolodex",
        inbound_path: "/rolodex",
        method: RelayMethod::Get,
        upstream_path: "/v1/s1/e3/resources/oracle-rolodex",
        authenticated: true,
        input: RelayInput::QueryParams(&[QueryParam {
            name: "name",
            kind: FieldKind::String,
            default: None,
        }]),
        fallback_error: "Failed to fetch rolodex data",
    },
    RelayRoute {
        operation: "solution3",
        inbound_path: "/solution3",
        method: RelayMethod::Post,
        upstream_path: "/v1/s1/e3/solution",
        authenticated: true,
        input: RelayInput::BodyFields(&[BodyField {
            name: "planet",
            kind: FieldKind::String,
        }]),
        fallback_error: "Failed to post planet data",
    },
];

/// Look up a relay route by operation name.
#[cfg(test)]
pub fn route_for(operation: &str) -> Option<&'static RelayRoute> {
    RELAY_ROUTES.iter().find(|route| route.operation == operation)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl RelayRoute {
    /// Validate inbound input and build the outbound call.
    ///
    /// An empty body is read as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the body is not JSON, a
    /// required field is missing or mistyped, or a query parameter does not
    /// parse as its declared type.
    pub fn prepare(
        &self,
        query: &BTreeMap<String, String>,
        body: &[u8],
    ) -> Result<OutboundCall, GatewayError> {
        match self.input {
            RelayInput::None => Ok(OutboundCall::default()),
            RelayInput::PassThroughBody => Ok(OutboundCall {
                query: Vec::new(),
                body: Some(parse_body(body)?),
            }),
            RelayInput::BodyFields(fields) => {
                let inbound = parse_body(body)?;
                let mut outbound = Map::new();
                for field in fields {
                    let value = inbound
                        .get(field.name)
                        .filter(|value| field.kind.matches_json(value))
                        .ok_or_else(|| {
                            GatewayError::Validation(format!(
                                "{} is required and must be {}",
                                field.name,
                                field.kind.describe()
                            ))
                        })?;
                    outbound.insert(field.name.to_owned(), value.clone());
                }
                Ok(OutboundCall {
                    query: Vec::new(),
                    body: Some(Value::Object(outbound)),
                })
            }
            RelayInput::QueryParams(params) => {
                let mut outbound = Vec::with_capacity(params.len());
                for param in params {
                    match query.get(param.name).filter(|raw| !raw.trim().is_empty()) {
                        Some(raw) if param.kind.matches_query(raw) => {
                            outbound.push((param.name, raw.clone()));
                        }
                        Some(raw) => {
                            return Err(GatewayError::Validation(format!(
                                "{} must be {}, got {raw:?}",
                                param.name,
                                param.kind.describe()
                            )));
                        }
                        None => {
                            if let Some(default) = param.default {
                                outbound.push((param.name, default.to_owned()));
                            }
                        }
                    }
                }
                Ok(OutboundCall {
                    query: outbound,
                    body: None,
                })
            }
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Value, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::Validation(format!("request body must be valid JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Forwarding
// ---------------------------------------------------------------------------

/// Validate, forward, and map the upstream answer for one relay operation.
///
/// # Errors
///
/// - [`GatewayError::Validation`] for malformed input (no upstream call made)
/// - [`GatewayError::Upstream`] when upstream answers non-2xx
/// - [`GatewayError::UpstreamUnreachable`] on transport failure
pub async fn forward(
    state: &AppState,
    route: &'static RelayRoute,
    query: &BTreeMap<String, String>,
    body: &[u8],
) -> Result<Response, GatewayError> {
    let call = route.prepare(query, body)?;

    let span = info_span!(
        "relay",
        operation = route.operation,
        request_id = %uuid::Uuid::new_v4()
    );

    async move {
        debug!(
            url = state.upstream.url_for(route.upstream_path),
            authenticated = route.authenticated,
            "forwarding to upstream"
        );

        let response = state
            .upstream
            .send(
                route.method.method(),
                route.upstream_path,
                route.authenticated,
                &call,
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "upstream unreachable");
                GatewayError::UpstreamUnreachable {
                    operation: route.operation,
                    fallback: route.fallback_error,
                    reason: e.to_string(),
                }
            })?;

        if response.status.is_success() {
            debug!(status = response.status.as_u16(), "upstream ok");
            return Ok(response.into_response());
        }

        warn!(
            status = response.status.as_u16(),
            body_len = response.body.len(),
            "upstream returned an error"
        );
        Err(GatewayError::Upstream {
            status: response.status,
            content_type: response.content_type,
            body: response.body,
            fallback: route.fallback_error,
        })
    }
    .instrument(span)
    .await
}
