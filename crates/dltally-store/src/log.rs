//! Append-only download log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use dltally_core::{DownloadLogEntry, DownloadLogPort, StorageError};

use crate::lock::{LockMode, io_error, with_lock};

/// Bytes read per step when scanning the log backwards.
const TAIL_CHUNK: u64 = 8 * 1024;

/// Download log stored as tab-separated lines.
#[derive(Debug, Clone)]
pub struct FileDownloadLog {
    path: PathBuf,
}

impl FileDownloadLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DownloadLogPort for FileDownloadLog {
    fn append(&self, entry: &DownloadLogEntry) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| io_error(&self.path, e))?;

        let line = entry.to_line();
        with_lock(&mut file, &self.path, LockMode::Exclusive, |f| {
            f.write_all(line.as_bytes())
        })?;

        tracing::debug!(target: "dltally.store", path = %self.path.display(), "Appended download log entry");
        Ok(())
    }

    fn read_recent(&self, limit: usize) -> Result<Vec<DownloadLogEntry>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        let entries = with_lock(&mut file, &self.path, LockMode::Shared, |f| {
            let mut start = f.seek(SeekFrom::End(0))?;
            let mut tail = Vec::new();
            loop {
                let step = start.min(TAIL_CHUNK);
                start -= step;
                f.seek(SeekFrom::Start(start))?;
                let mut chunk = Vec::new();
                Read::take(&mut *f, step).read_to_end(&mut chunk)?;
                chunk.append(&mut tail);
                tail = chunk;

                let entries = parse_tail(&tail, start > 0);
                if start == 0 || entries.len() >= limit {
                    return Ok(entries);
                }
            }
        })?;

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

/// Parse the lines of `bytes`. With `partial_head` the first line may have
/// been cut by the read window and is dropped.
fn parse_tail(bytes: &[u8], partial_head: bool) -> Vec<DownloadLogEntry> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines = text.lines();
    if partial_head {
        lines.next();
    }
    lines.filter_map(DownloadLogEntry::parse_line).collect()
}
