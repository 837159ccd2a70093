//! API-key guard middleware.
//!
//! Every proxied path requires the `X-API-KEY` header to byte-equal the
//! configured secret. Diagnostic endpoints are routed around this layer and
//! never pass through it.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ProxyError;
use crate::http::server::AppState;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request with 401 unless `X-API-KEY` exactly matches the
/// configured secret. Comparison is case-sensitive and byte-for-byte; a
/// missing or empty header never matches.
pub async fn verify_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let supplied = request.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());

    match supplied {
        Some(key) if !key.is_empty() && key == state.config.api_key.as_bytes() => {
            next.run(request).await
        }
        _ => {
            tracing::debug!(
                path = %request.uri().path(),
                "Rejected request with invalid or missing API key"
            );
            ProxyError::InvalidApiKey.into_response()
        }
    }
}
