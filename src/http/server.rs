//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: diagnostic routes plus guarded catch-all
//! - Build the shared outbound client with the configured timeout
//! - Wire up middleware (tracing)
//! - Serve with graceful shutdown
//!
//! Diagnostic endpoints are merged in without the API-key layer, so the
//! guard never runs for them; every other path goes through the guard and
//! then the forwarder.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::diagnostics;
use crate::http::forward::forward_handler;
use crate::security::api_key::verify_api_key;

/// Application state injected into handlers. Configuration is immutable
/// after startup; the client is shared by the forwarder and the public-IP
/// lookup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: reqwest::Client,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        let state = AppState {
            config: Arc::new(config),
            client,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router: unguarded diagnostics merged with the guarded
    /// catch-all proxy routes.
    fn build_router(state: AppState) -> Router {
        let protected = Router::new()
            .route("/", any(forward_handler))
            .route("/{*path}", any(forward_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                verify_api_key,
            ));

        Router::new()
            .merge(diagnostics::router())
            .merge(protected)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
