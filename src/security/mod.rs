//! Access control and header hygiene.
//!
//! # Responsibilities
//! - Gate all proxied traffic behind the `X-API-KEY` shared secret
//! - Strip client-identity headers before anything leaves for the upstream
//!
//! # Design Decisions
//! - The guard runs as router middleware so the forwarder never sees an
//!   unauthenticated request
//! - Diagnostic endpoints bypass the guard structurally (separate router),
//!   not via per-request path checks

pub mod api_key;
pub mod headers;

pub use api_key::verify_api_key;
pub use headers::{sanitize_headers, CLIENT_IDENTITY_HEADERS};
