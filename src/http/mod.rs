//! HTTP request path.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (router: diagnostic paths vs. catch-all)
//!     → security::api_key (guard, protected paths only)
//!     → forward.rs (URL build, header sanitize/augment, upstream call)
//!     → response relay to client
//! ```

pub mod error;
pub mod forward;
pub mod server;

pub use error::ProxyError;
pub use server::{AppState, HttpServer};
