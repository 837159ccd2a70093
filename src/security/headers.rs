//! Outbound header sanitization.
//!
//! The proxy runs behind a hosting platform that injects headers revealing
//! the original client's network identity (`x-forwarded-*`, Cloudflare's
//! `cf-*`, and friends). None of those may reach the upstream, so the
//! outbound header set is built fresh from the inbound one with the
//! block-list filtered out.

use axum::http::HeaderMap;

/// Headers that reveal the original client's network identity. Matched
/// case-insensitively (`HeaderName` is already lowercase).
pub const CLIENT_IDENTITY_HEADERS: [&str; 8] = [
    "x-forwarded-for",
    "x-forwarded-host",
    "x-forwarded-port",
    "x-forwarded-proto",
    "x-real-ip",
    "cf-connecting-ip",
    "cf-ray",
    "true-client-ip",
];

/// Headers that are never copied verbatim because the forwarder replaces or
/// recomputes them: `host` is forced to the upstream hostname, and the
/// framing headers are derived from the re-buffered body.
const REWRITTEN_HEADERS: [&str; 3] = ["host", "content-length", "transfer-encoding"];

/// Build a fresh outbound header map from the inbound one, excluding the
/// client-identity block-list and the headers the forwarder rewrites.
pub fn sanitize_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        let name_str = name.as_str();
        if CLIENT_IDENTITY_HEADERS.contains(&name_str) || REWRITTEN_HEADERS.contains(&name_str) {
            continue;
        }
        outbound.insert(name.clone(), value.clone());
    }
    outbound
}
