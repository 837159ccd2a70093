use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

#[derive(Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub service: &'static str,
    pub time: String,
}

#[derive(Serialize)]
pub struct DiagnosticStatus {
    pub ok: bool,
    pub masked_api_key: String,
    pub bakong_api_url: String,
    pub port: u16,
    pub env_proxy_key_present: bool,
}

#[derive(Serialize)]
pub struct PublicIpStatus {
    pub ok: bool,
    pub ip: String,
    pub source: &'static str,
    pub time: String,
}

#[derive(Serialize)]
pub struct PublicIpFailure {
    pub ok: bool,
    pub error: &'static str,
    pub details: String,
}

#[derive(Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// Mask a secret for diagnostics. `None` reports as `MISSING`; short values
/// are returned as-is; anything 12 chars or longer shows only the first 6
/// and last 4 chars.
pub fn mask(value: Option<&str>) -> String {
    match value {
        None => "MISSING".to_string(),
        Some(v) => {
            let chars: Vec<char> = v.chars().collect();
            if chars.len() < 12 {
                v.to_string()
            } else {
                let head: String = chars[..6].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{head}…{tail}")
            }
        }
    }
}

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        ok: true,
        service: "khqr-proxy",
        time: iso_now(),
    })
}

pub async fn diagnostic(State(state): State<AppState>) -> Json<DiagnosticStatus> {
    Json(DiagnosticStatus {
        ok: true,
        masked_api_key: mask(Some(&state.config.api_key)),
        bakong_api_url: state.config.upstream_base_url.clone(),
        port: state.config.port,
        env_proxy_key_present: state.config.api_key_from_env,
    })
}

/// Look up the proxy's outbound IP via api.ipify.org. Useful when the
/// upstream requires IP allow-listing and the hosting platform's egress
/// address is not obvious.
pub async fn public_ip(State(state): State<AppState>) -> Response {
    let result = async {
        let response = state.client.get(IP_LOOKUP_URL).send().await?;
        response.json::<IpifyResponse>().await
    }
    .await;

    match result {
        Ok(data) => Json(PublicIpStatus {
            ok: true,
            ip: data.ip,
            source: "api.ipify.org",
            time: iso_now(),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Public IP lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PublicIpFailure {
                    ok: false,
                    error: "Failed to fetch public IP",
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_short_value_passes_through() {
        assert_eq!(mask(Some("abc")), "abc");
    }

    #[test]
    fn mask_eleven_chars_passes_through() {
        assert_eq!(mask(Some("abcdefghijk")), "abcdefghijk");
    }

    #[test]
    fn mask_long_value_keeps_head_and_tail() {
        assert_eq!(mask(Some("abcdefghijklmnop")), "abcdef…mnop");
    }

    #[test]
    fn mask_missing_value() {
        assert_eq!(mask(None), "MISSING");
    }

    #[test]
    fn mask_exactly_twelve_chars_is_masked() {
        assert_eq!(mask(Some("abcdefghijkl")), "abcdef…ijkl");
    }
}
