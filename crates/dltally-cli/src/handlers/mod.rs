//! Command handlers.
//!
//! Handlers write to the supplied writer so they can be exercised in tests.

pub mod count;
pub mod init;
pub mod log;
pub mod paths;
pub mod serve;
