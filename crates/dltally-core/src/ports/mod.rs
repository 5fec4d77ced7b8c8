//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No locking or file-handle types in any signature
//! - Methods are blocking; async adapters call them from a blocking pool
//! - Every I/O step reports failure through `StorageError`

pub mod clock;
pub mod download_counter;
pub mod download_log;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub use clock::{Clock, SystemClock};
pub use download_counter::DownloadCounterPort;
pub use download_log::DownloadLogPort;

/// Container for the storage trait objects.
///
/// Lives in `dltally-core` so that `DownloadRecorder` can be wired without
/// depending on `dltally-store`.
#[derive(Clone)]
pub struct Stores {
    /// Append-only download log.
    pub log: Arc<dyn DownloadLogPort>,
    /// Persisted download counter.
    pub counter: Arc<dyn DownloadCounterPort>,
}

impl Stores {
    /// Create a new Stores container.
    pub fn new(log: Arc<dyn DownloadLogPort>, counter: Arc<dyn DownloadCounterPort>) -> Self {
        Self { log, counter }
    }
}

/// Errors raised by storage adapters.
///
/// Carries the path that failed so operators can tell the log file from
/// the counter file in the logs.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Opening, reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The advisory lock could not be acquired or released.
    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Path of the file the failed operation touched.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Lock { path, .. } => path,
        }
    }
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
