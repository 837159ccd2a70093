//! Unauthenticated diagnostic endpoints.
//!
//! Fixed-response handlers for health checks and deployment debugging. None
//! of these expose the raw API key; the configured secret is only ever
//! reported masked.

pub mod handlers;

use axum::{routing::get, Router};

use crate::http::server::AppState;
use self::handlers::{diagnostic, health, public_ip};

pub use handlers::mask;

/// Router for the diagnostic allow-list. Merged into the main router
/// without the API-key guard layer.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/diagnostic", get(diagnostic))
        .route("/public-ip", get(public_ip))
}
