//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use dltally_core::{CoreError, PathError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (file not found, permission denied, lock failure).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP server failed.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
            Self::Server(_) => 70, // EX_SOFTWARE
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(storage) => Self::Io(storage.to_string()),
            CoreError::Settings(settings) => Self::Config(settings.to_string()),
            CoreError::Configuration(msg) => Self::Config(msg),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dltally_core::StorageError;

    #[test]
    fn storage_failures_are_io_errors() {
        let err: CliError = CoreError::Storage(StorageError::Io {
            path: "counter.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
        .into();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn settings_failures_are_config_errors() {
        let err: CliError = SettingsError::UnknownTimezone("Nowhere".to_string()).into();
        assert_eq!(err.exit_code(), 78);
        assert_eq!(err.to_string(), "Configuration error: Unknown timezone: Nowhere");
    }
}
