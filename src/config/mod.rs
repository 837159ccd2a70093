//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read env vars, parse, resolve upstream host)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to guard, forwarder, and diagnostics
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at startup; no ambient env lookups in
//!   handler logic
//! - The API key falls back to a literal default when `PROXY_API_KEY` is
//!   unset; this is a known weak default kept for parity and surfaced via
//!   `/diagnostic`
//! - The upstream base URL defaults to the Bakong production endpoint and
//!   may be overridden via `BAKONG_API_URL`

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ProxyConfig;
