//! CLI adapter for dltally.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
