//! Counter file holding the cumulative download count.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use dltally_core::{
    DownloadCounterPort, IncrementStrategy, StorageError, format_count, parse_count,
};

use crate::lock::{LockMode, io_error, with_lock};

/// Counter stored as a bare decimal integer.
#[derive(Debug, Clone)]
pub struct FileCounterStore {
    path: PathBuf,
    strategy: IncrementStrategy,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>, strategy: IncrementStrategy) -> Self {
        Self {
            path: path.into(),
            strategy,
        }
    }

    /// One exclusive lock spans the whole read-increment-write.
    fn increment_locked(&self) -> Result<u64, StorageError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| io_error(&self.path, e))?;

        with_lock(&mut file, &self.path, LockMode::Exclusive, |f| {
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            let next = parse_count(&String::from_utf8_lossy(&buf)).saturating_add(1);

            // Overwrite in place, then cut; a failed write never leaves the file empty
            let text = format_count(next);
            f.seek(SeekFrom::Start(0))?;
            f.write_all(text.as_bytes())?;
            f.set_len(text.len() as u64)?;
            Ok(next)
        })
    }

    /// Unlocked read followed by a locked truncate-and-write.
    ///
    /// Two concurrent calls can read the same value; one update is then lost.
    /// A counter that cannot be read counts as 0 and is overwritten with 1.
    fn increment_split(&self) -> Result<u64, StorageError> {
        let next = count_from_read(&self.path, fs::read(&self.path)).saturating_add(1);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| io_error(&self.path, e))?;

        with_lock(&mut file, &self.path, LockMode::Exclusive, |f| {
            f.write_all(format_count(next).as_bytes())
        })?;
        Ok(next)
    }
}

/// Value of an unlocked read. Missing or unreadable files count as 0.
fn count_from_read(path: &Path, read: io::Result<Vec<u8>>) -> u64 {
    match read {
        Ok(bytes) => parse_count(&String::from_utf8_lossy(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
        Err(e) => {
            tracing::warn!(
                target: "dltally.store",
                path = %path.display(),
                error = %e,
                "Counter unreadable, counting from 0"
            );
            0
        }
    }
}

impl DownloadCounterPort for FileCounterStore {
    fn current(&self) -> Result<u64, StorageError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        let bytes = with_lock(&mut file, &self.path, LockMode::Shared, |f| {
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Ok(buf)
        })?;
        Ok(parse_count(&String::from_utf8_lossy(&bytes)))
    }

    fn increment(&self) -> Result<u64, StorageError> {
        let next = match self.strategy {
            IncrementStrategy::Locked => self.increment_locked()?,
            IncrementStrategy::SplitLock => self.increment_split()?,
        };
        tracing::debug!(
            target: "dltally.store",
            path = %self.path.display(),
            strategy = %self.strategy,
            value = next,
            "Counter updated"
        );
        Ok(next)
    }

    fn initialize(&self, force: bool) -> Result<bool, StorageError> {
        let mut options = OpenOptions::new();
        options.write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = match options.open(&self.path) {
            Ok(file) => file,
            Err(e) if !force && e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        with_lock(&mut file, &self.path, LockMode::Exclusive, |f| {
            f.write_all(format_count(0).as_bytes())
        })?;
        tracing::info!(target: "dltally.store", path = %self.path.display(), "Counter initialized to 0");
        Ok(true)
    }
}
