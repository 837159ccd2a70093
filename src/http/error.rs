//! Error taxonomy and JSON error envelopes.
//!
//! Every failure in the request path is converted into a structured JSON
//! response at the handler boundary; nothing propagates as a process-level
//! failure. Callers always receive a body with an `error` field and a status
//! matching the failure class (401 for auth, 500 for forwarding failures).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures visible to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// `X-API-KEY` missing, empty, or not byte-equal to the configured
    /// secret. Never reaches the forwarder.
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// Anything that went wrong between us and the upstream: DNS, connect,
    /// timeout, or a malformed response.
    #[error("Proxy error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Upstream(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid or missing API key" })),
            )
                .into_response(),
            ProxyError::Upstream(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Proxy error", "details": details })),
            )
                .into_response(),
        }
    }
}
