//! Configuration loading from the process environment.

use std::env;

use url::Url;

use crate::config::schema::{
    ProxyConfig, DEFAULT_API_KEY, DEFAULT_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    DEFAULT_UPSTREAM_URL,
};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid UPSTREAM_TIMEOUT_SECS value {value:?}: {source}")]
    InvalidTimeout {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid upstream base URL {value:?}: {reason}")]
    InvalidUpstreamUrl { value: String, reason: String },
}

/// Parse an upstream base URL and extract the hostname forced into the
/// outbound `host` header. Trailing slashes are trimmed so that inbound
/// paths (which always start with `/`) append cleanly.
pub fn resolve_upstream(raw: &str) -> Result<(String, String), ConfigError> {
    let base = raw.trim_end_matches('/').to_string();
    let parsed = Url::parse(&base).map_err(|e| ConfigError::InvalidUpstreamUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ConfigError::InvalidUpstreamUrl {
            value: raw.to_string(),
            reason: "URL has no host".to_string(),
        })?
        .to_string();
    Ok((base, host))
}

/// Build the proxy configuration from environment variables, read once here
/// and never again.
pub fn load_config() -> Result<ProxyConfig, ConfigError> {
    let api_key_env = env::var("PROXY_API_KEY").ok();
    let api_key_from_env = api_key_env.is_some();
    let api_key = api_key_env.unwrap_or_else(|| DEFAULT_API_KEY.to_string());

    let upstream_token = env::var("BAKONG_TOKEN").ok().filter(|t| !t.is_empty());

    let upstream_raw =
        env::var("BAKONG_API_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());
    let (upstream_base_url, upstream_host) = resolve_upstream(&upstream_raw)?;

    let port = match env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort { value, source })?,
        Err(_) => DEFAULT_PORT,
    };

    let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidTimeout { value, source })?,
        Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
    };

    Ok(ProxyConfig {
        api_key,
        api_key_from_env,
        upstream_token,
        upstream_base_url,
        upstream_host,
        port,
        upstream_timeout_secs,
    })
}
