//! Download log port.

use super::StorageError;
use crate::domain::DownloadLogEntry;

/// Append-only audit trail of download events.
///
/// # Design Rules
///
/// - Entries are never modified or removed
/// - `append` holds an exclusive lock on the log for the duration of the write
#[cfg_attr(test, mockall::automock)]
pub trait DownloadLogPort: Send + Sync {
    /// Append one entry as a single line.
    fn append(&self, entry: &DownloadLogEntry) -> Result<(), StorageError>;

    /// Read the last `limit` well-formed entries, oldest first.
    ///
    /// Only the end of the log needed to find them is read. Lines that do not
    /// decode are skipped. A missing log reads as empty.
    fn read_recent(&self, limit: usize) -> Result<Vec<DownloadLogEntry>, StorageError>;
}
