//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that run the blocking recorder on tokio's
//! blocking pool.

pub mod download;
pub mod stats;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
