//! Request forwarding.
//!
//! # Responsibilities
//! - Rebuild the target URL from the upstream base, inbound path, and query
//! - Sanitize and augment the outbound header set
//! - Buffer the body for body-bearing methods
//! - Call the upstream and relay its response verbatim in content
//!
//! # Design Decisions
//! - The relay is fully buffered, not streamed; `content-encoding` and the
//!   framing headers are dropped from the relayed response because the body
//!   has already been decoded to text and the declared encoding would no
//!   longer match the bytes
//! - Either the full relay succeeds or a single JSON error body is returned;
//!   there is no partial relay

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderValue, Method, Request},
    response::Response,
};
use url::form_urlencoded;

use crate::http::error::ProxyError;
use crate::http::server::AppState;
use crate::security::headers::sanitize_headers;

/// Methods that conventionally carry a request body. Everything else is
/// forwarded body-less.
pub const BODY_BEARING_METHODS: [Method; 3] = [Method::POST, Method::PUT, Method::PATCH];

/// Response headers never copied back to the caller: the body is relayed as
/// buffered text, so encoding and framing are recomputed on our side.
const UNRELAYED_RESPONSE_HEADERS: [&str; 3] =
    ["content-encoding", "content-length", "transfer-encoding"];

pub fn method_carries_body(method: &Method) -> bool {
    BODY_BEARING_METHODS.contains(method)
}

/// Build the outbound URL: `<base><path>` with the inbound query
/// re-serialized and appended when non-empty. The path is used verbatim.
/// Duplicate query keys collapse to their last value, keeping the position
/// of the first occurrence.
pub fn build_target_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(raw) = query {
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if let Some(existing) = params.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value.into_owned();
            } else {
                params.push((key.into_owned(), value.into_owned()));
            }
        }
    }

    if params.is_empty() {
        return format!("{base}{path}");
    }

    let query_string = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&params)
        .finish();
    format!("{base}{path}?{query_string}")
}

/// Buffer the inbound body. An unreadable body degrades to `None` and
/// forwarding proceeds body-less.
async fn read_body(body: Body) -> Option<Bytes> {
    axum::body::to_bytes(body, usize::MAX).await.ok()
}

/// Catch-all handler: transform the inbound request and relay the upstream
/// response. Runs only behind the API-key guard.
pub async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();
    let target = build_target_url(&state.config.upstream_base_url, &path, parts.uri.query());

    tracing::info!(
        method = %method,
        path = %path,
        target = %target,
        "Forwarding request"
    );

    // Fresh outbound header set: block-listed and rewritten headers excluded
    let mut headers = sanitize_headers(&parts.headers);
    headers.insert(
        header::HOST,
        HeaderValue::from_str(&state.config.upstream_host)
            .map_err(|e| ProxyError::Upstream(e.to_string()))?,
    );
    if let Some(token) = &state.config.upstream_token {
        if !headers.contains_key(header::AUTHORIZATION) {
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| ProxyError::Upstream(e.to_string()))?,
            );
        }
    }
    if !headers.contains_key(header::ACCEPT) {
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    }

    let body_bytes = if method_carries_body(&method) {
        read_body(body).await
    } else {
        None
    };

    let mut builder = state
        .client
        .request(method.clone(), target.as_str())
        .headers(headers);
    if let Some(bytes) = body_bytes {
        builder = builder.body(bytes);
    }

    let upstream = builder.send().await.map_err(|e| {
        tracing::error!(
            method = %method,
            path = %path,
            error = %e,
            "Upstream request failed"
        );
        ProxyError::from(e)
    })?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();
    let body_text = upstream.text().await.map_err(|e| {
        tracing::error!(
            method = %method,
            path = %path,
            error = %e,
            "Failed to read upstream response"
        );
        ProxyError::from(e)
    })?;

    tracing::info!(
        method = %method,
        path = %path,
        status = %status,
        "Upstream responded"
    );

    let mut response = Response::builder().status(status);
    if let Some(relayed) = response.headers_mut() {
        for (name, value) in &upstream_headers {
            if UNRELAYED_RESPONSE_HEADERS.contains(&name.as_str()) {
                continue;
            }
            relayed.append(name.clone(), value.clone());
        }
    }

    response
        .body(Body::from(body_text))
        .map_err(|e| ProxyError::Upstream(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_bearing_methods_are_post_put_patch() {
        assert!(method_carries_body(&Method::POST));
        assert!(method_carries_body(&Method::PUT));
        assert!(method_carries_body(&Method::PATCH));
        assert!(!method_carries_body(&Method::GET));
        assert!(!method_carries_body(&Method::DELETE));
        assert!(!method_carries_body(&Method::HEAD));
    }

    #[test]
    fn target_url_without_query() {
        let url = build_target_url("https://api-bakong.nbc.gov.kh", "/v1/check_transaction", None);
        assert_eq!(url, "https://api-bakong.nbc.gov.kh/v1/check_transaction");
    }

    #[test]
    fn target_url_with_query() {
        let url = build_target_url("http://127.0.0.1:9000", "/v1/list", Some("page=2&size=10"));
        assert_eq!(url, "http://127.0.0.1:9000/v1/list?page=2&size=10");
    }

    #[test]
    fn target_url_empty_query_appends_nothing() {
        let url = build_target_url("http://127.0.0.1:9000", "/v1/list", Some(""));
        assert_eq!(url, "http://127.0.0.1:9000/v1/list");
    }

    #[test]
    fn duplicate_query_keys_keep_last_value_first_position() {
        let url = build_target_url("http://u", "/p", Some("a=1&b=2&a=3"));
        assert_eq!(url, "http://u/p?a=3&b=2");
    }

    #[test]
    fn query_values_are_re_encoded() {
        let url = build_target_url("http://u", "/p", Some("q=hello%20world"));
        assert_eq!(url, "http://u/p?q=hello+world");
    }

    #[test]
    fn path_is_used_verbatim() {
        // No normalization of dot segments or double slashes
        let url = build_target_url("http://u", "/a//b/../c", None);
        assert_eq!(url, "http://u/a//b/../c");
    }
}
