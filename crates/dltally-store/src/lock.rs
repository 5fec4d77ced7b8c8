//! Advisory lock helpers.

use std::fs::File;
use std::io;
use std::path::Path;

use dltally_core::StorageError;
use fs2::FileExt;

#[derive(Clone, Copy)]
pub(crate) enum LockMode {
    Shared,
    Exclusive,
}

pub(crate) fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn lock_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Lock {
        path: path.to_path_buf(),
        source,
    }
}

/// Run `op` while holding a lock on `file`.
///
/// The lock is released before returning, whether or not `op` failed. An
/// error from `op` takes precedence over an unlock error.
pub(crate) fn with_lock<T>(
    file: &mut File,
    path: &Path,
    mode: LockMode,
    op: impl FnOnce(&mut File) -> io::Result<T>,
) -> Result<T, StorageError> {
    match mode {
        LockMode::Shared => FileExt::lock_shared(&*file),
        LockMode::Exclusive => FileExt::lock_exclusive(&*file),
    }
    .map_err(|e| lock_error(path, e))?;

    let result = op(&mut *file);
    let unlocked = FileExt::unlock(&*file);

    let value = result.map_err(|e| io_error(path, e))?;
    unlocked.map_err(|e| lock_error(path, e))?;
    Ok(value)
}
