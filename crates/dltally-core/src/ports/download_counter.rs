//! Download counter port.

use super::StorageError;

/// Persisted, monotonically non-decreasing download count.
#[cfg_attr(test, mockall::automock)]
pub trait DownloadCounterPort: Send + Sync {
    /// Read the current value. Missing or malformed content reads as zero.
    fn current(&self) -> Result<u64, StorageError>;

    /// Add one to the stored value and return the value written.
    fn increment(&self) -> Result<u64, StorageError>;

    /// Write `0` to the counter file.
    ///
    /// Without `force` an existing file is left untouched. Returns whether
    /// the file was written.
    fn initialize(&self, force: bool) -> Result<bool, StorageError>;
}
