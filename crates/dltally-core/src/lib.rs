//! Core domain for dltally: download log entries, the persisted counter,
//! storage ports and the [`DownloadRecorder`] service.
//!
//! Adapters (`dltally-store`, `dltally-axum`, `dltally-cli`) depend on this
//! crate; it depends on none of them.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{DownloadLogEntry, format_count, format_timestamp, parse_count};
pub use paths::{
    DirectoryCreationStrategy, PathError, data_root, ensure_parent_dir, resolve_data_path,
};
pub use ports::{
    Clock, CoreError, DownloadCounterPort, DownloadLogPort, StorageError, Stores, SystemClock,
};
pub use services::{DownloadOutcome, DownloadRecorder};
pub use settings::{
    DEFAULT_COUNTER_FILE, DEFAULT_LOG_FILE, DEFAULT_RESOURCE_PATH, DEFAULT_TIMEZONE,
    FailurePolicy, IncrementStrategy, SettingsError, TallySettings,
};
