//! Path utilities for the log and counter files.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod ensure;
mod error;
mod resolve;

pub use ensure::{DirectoryCreationStrategy, ensure_parent_dir};
pub use error::PathError;
pub use resolve::{data_root, resolve_data_path};
