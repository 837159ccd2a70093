//! KHQR Proxy Library

pub mod config;
pub mod diagnostics;
pub mod http;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
