//! Domain types for download accounting.
//!
//! Both persisted entities are flat text files:
//! - the download log, one [`DownloadLogEntry`] per line
//! - the counter, a single decimal integer

mod counter;
mod entry;

pub use counter::{format_count, parse_count};
pub use entry::{DownloadLogEntry, TIMESTAMP_FORMAT, format_timestamp};
