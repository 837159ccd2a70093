//! KHQR Proxy
//!
//! A small authenticating forward proxy for the Bakong KHQR API, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  KHQR PROXY                   │
//!                         │                                               │
//!     Client Request      │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!     ────────────────────┼─▶│   http   │──▶│ security  │──▶│  http   │  │
//!                         │  │  server  │   │ api_key   │   │ forward │  │
//!                         │  └────┬─────┘   │  guard    │   └────┬────┘  │
//!                         │       │         └───────────┘        │       │
//!                         │       ▼                              ▼       │
//!                         │  ┌──────────────┐             ┌───────────┐  │
//!     Client Response     │  │ diagnostics  │             │ upstream  │◀─┼── Bakong API
//!     ◀───────────────────┼──│ /health etc. │             │   call    │  │
//!                         │  └──────────────┘             └───────────┘  │
//!                         │                                               │
//!                         │  Cross-cutting: config (env, immutable),      │
//!                         │  tracing, JSON error envelopes                │
//!                         └──────────────────────────────────────────────┘
//! ```
//!
//! Every request is an independent transform: path match, API-key guard,
//! header sanitization, relay. No shared mutable state between requests.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use khqr_proxy::config::loader::load_config;
use khqr_proxy::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "khqr_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("khqr-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration from the process environment (read once, immutable after)
    let config = load_config()?;

    tracing::info!(
        port = config.port,
        upstream = %config.upstream_base_url,
        api_key_from_env = config.api_key_from_env,
        upstream_token_present = config.upstream_token.is_some(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "KHQR Proxy listening"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
