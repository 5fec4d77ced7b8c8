//! Axum web adapter for dltally.
//!
//! Serves the download endpoint (log, count, redirect), a health check and
//! a stats endpoint, optionally with the artifact directory as a static
//! fallback.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; these are used by tests/
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod client_addr;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, ServerConfig, bootstrap, start_server};
pub use client_addr::ClientAddress;
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
