//! Resolution of configured file names against the data directory.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Data root: the explicit override if given, otherwise the current directory.
pub fn data_root(override_dir: Option<&Path>) -> Result<PathBuf, PathError> {
    match override_dir {
        Some(dir) if dir.as_os_str().is_empty() => Err(PathError::EmptyPath),
        Some(dir) => Ok(dir.to_path_buf()),
        None => env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string())),
    }
}

/// Resolve a configured file against the data root.
///
/// Absolute paths are returned unchanged; relative ones are joined onto `root`.
pub fn resolve_data_path(root: &Path, file: &Path) -> Result<PathBuf, PathError> {
    if file.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }
    if file.is_absolute() {
        Ok(file.to_path_buf())
    } else {
        Ok(root.join(file))
    }
}
