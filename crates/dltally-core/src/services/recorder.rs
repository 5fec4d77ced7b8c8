//! Download recorder: the audit-then-count sequence run for every download.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::domain::DownloadLogEntry;
use crate::ports::{Clock, CoreError, DownloadCounterPort, DownloadLogPort, StorageError};
use crate::settings::{FailurePolicy, TallySettings};

/// Result of recording one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Whether the audit line was written.
    pub logged: bool,
    /// Counter value after the increment, `None` if the update failed.
    pub count: Option<u64>,
    /// Where the client should be sent.
    pub redirect_to: String,
}

/// Records downloads against a log and a counter.
///
/// Steps run in a fixed order: append the log line, then update the counter.
/// The two files are locked independently; nothing rolls back the log line
/// if the counter update fails.
pub struct DownloadRecorder {
    log: Arc<dyn DownloadLogPort>,
    counter: Arc<dyn DownloadCounterPort>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    resource_path: String,
    failure_policy: FailurePolicy,
}

impl DownloadRecorder {
    /// Create a recorder. Fails if the settings do not validate.
    pub fn new(
        log: Arc<dyn DownloadLogPort>,
        counter: Arc<dyn DownloadCounterPort>,
        clock: Arc<dyn Clock>,
        settings: &TallySettings,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            log,
            counter,
            clock,
            timezone: settings.timezone()?,
            resource_path: settings.resource_path.clone(),
            failure_policy: settings.failure_policy,
        })
    }

    /// The fixed redirect target.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Record one download from `client_address`.
    ///
    /// Under [`FailurePolicy::Strict`] the first storage failure is returned
    /// and later steps are skipped. Under [`FailurePolicy::BestEffort`] failures
    /// are logged and the outcome still carries the redirect.
    pub fn record(&self, client_address: &str) -> Result<DownloadOutcome, CoreError> {
        let at = self.clock.now().with_timezone(&self.timezone);
        let entry = DownloadLogEntry::new(&at, client_address, self.resource_path.as_str());

        let logged = match self.log.append(&entry) {
            Ok(()) => true,
            Err(e) => {
                self.tolerate(e, "append download log")?;
                false
            }
        };

        let count = match self.counter.increment() {
            Ok(value) => Some(value),
            Err(e) => {
                self.tolerate(e, "update download counter")?;
                None
            }
        };

        tracing::info!(
            target: "dltally.download",
            client = %client_address,
            resource = %self.resource_path,
            logged,
            count = ?count,
            "Download recorded"
        );

        Ok(DownloadOutcome {
            logged,
            count,
            redirect_to: self.resource_path.clone(),
        })
    }

    /// Current counter value.
    pub fn count(&self) -> Result<u64, CoreError> {
        Ok(self.counter.current()?)
    }

    fn tolerate(&self, err: StorageError, step: &str) -> Result<(), CoreError> {
        match self.failure_policy {
            FailurePolicy::Strict => {
                tracing::error!(target: "dltally.download", error = %err, "Failed to {step}");
                Err(err.into())
            }
            FailurePolicy::BestEffort => {
                tracing::warn!(target: "dltally.download", error = %err, "Failed to {step}, continuing");
                Ok(())
            }
        }
    }
}
