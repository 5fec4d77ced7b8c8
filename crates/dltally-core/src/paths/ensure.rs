//! Directory creation for data files.
//!
//! The `DirectoryCreationStrategy` enum does NOT include interactive/prompt variants;
//! adapter code should handle user interaction separately.

use std::fs;
use std::path::Path;

use super::error::PathError;

/// Strategy for how to handle missing directories when ensuring they exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryCreationStrategy {
    /// Create directories automatically if they are missing.
    #[default]
    AutoCreate,
    /// Do not create directories; return an error if missing.
    Disallow,
}

/// Ensure the directory holding `file` exists.
///
/// A bare file name (no parent component) refers to the current directory
/// and always succeeds.
pub fn ensure_parent_dir(file: &Path, strategy: DirectoryCreationStrategy) -> Result<(), PathError> {
    if file.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if parent.exists() {
        if !parent.is_dir() {
            return Err(PathError::NotADirectory(parent.to_path_buf()));
        }
        return Ok(());
    }

    match strategy {
        DirectoryCreationStrategy::AutoCreate => {
            fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
            tracing::debug!(target: "dltally.paths", path = %parent.display(), "Created data directory");
            Ok(())
        }
        DirectoryCreationStrategy::Disallow => {
            Err(PathError::DirectoryNotFound(parent.to_path_buf()))
        }
    }
}
