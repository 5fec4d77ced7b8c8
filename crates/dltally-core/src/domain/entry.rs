//! Download log entry type and its line encoding.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// RFC 2822 style timestamp, e.g. `Sun, 18 Oct 2026 09:15:02 +0900`.
///
/// chrono renders `%a`/`%b` in English regardless of the process locale.
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Render a timestamp in the log's format.
pub fn format_timestamp(at: &DateTime<Tz>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// One line of the download log.
///
/// Fields are written in order, separated by a single tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLogEntry {
    pub timestamp: String,
    pub client_address: String,
    pub resource_path: String,
}

impl DownloadLogEntry {
    /// Build an entry stamped at `at`.
    pub fn new(
        at: &DateTime<Tz>,
        client_address: impl Into<String>,
        resource_path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: format_timestamp(at),
            client_address: client_address.into(),
            resource_path: resource_path.into(),
        }
    }

    /// Encode as a log line, including the trailing `\n`.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\n",
            self.timestamp, self.client_address, self.resource_path
        )
    }

    /// Decode a line written by [`to_line`](Self::to_line).
    ///
    /// Returns `None` unless the line has exactly three tab-separated fields.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut fields = line.split('\t');
        let timestamp = fields.next()?;
        let client_address = fields.next()?;
        let resource_path = fields.next()?;
        if fields.next().is_some() || timestamp.is_empty() {
            return None;
        }

        Some(Self {
            timestamp: timestamp.to_string(),
            client_address: client_address.to_string(),
            resource_path: resource_path.to_string(),
        })
    }
}
