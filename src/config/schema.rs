//! Configuration schema definitions.
//!
//! The whole proxy is driven by one flat, immutable struct constructed at
//! process entry and never mutated afterwards.

/// Default API key used when `PROXY_API_KEY` is unset.
///
/// WARNING: This is a placeholder, not a secret. It is preserved from the
/// original deployment as a documented configuration concern; set
/// `PROXY_API_KEY` in any real environment.
pub const DEFAULT_API_KEY: &str = "default-key";

/// Production Bakong KHQR API endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api-bakong.nbc.gov.kh";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default timeout for outbound upstream calls, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Root configuration for the proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Shared secret checked against the `X-API-KEY` request header.
    pub api_key: String,

    /// Whether `PROXY_API_KEY` was actually present in the environment
    /// (reported by `/diagnostic`).
    pub api_key_from_env: bool,

    /// Optional bearer token attached to outbound requests that carry no
    /// `authorization` header of their own.
    pub upstream_token: Option<String>,

    /// Base URL of the upstream API; inbound paths are appended verbatim.
    pub upstream_base_url: String,

    /// Hostname forced into the outbound `host` header. Derived from
    /// `upstream_base_url` at load time.
    pub upstream_host: String,

    /// TCP listen port.
    pub port: u16,

    /// Total timeout applied to each outbound upstream call.
    pub upstream_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            api_key_from_env: false,
            upstream_token: None,
            upstream_base_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_host: "api-bakong.nbc.gov.kh".to_string(),
            port: DEFAULT_PORT,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}
