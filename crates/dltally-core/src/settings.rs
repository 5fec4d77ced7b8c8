//! Settings domain types and validation.
//!
//! This module contains the tally settings shared by every adapter.
//! These are pure domain types with no infrastructure dependencies.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name of the download log file.
pub const DEFAULT_LOG_FILE: &str = "downloadLog_EduCOSMOS.txt";

/// Default name of the counter file.
pub const DEFAULT_COUNTER_FILE: &str = "counter.txt";

/// Default redirect target.
pub const DEFAULT_RESOURCE_PATH: &str = "Download/ODYSSEUS-EduCOSMOS-master.zip";

/// Default IANA timezone for log timestamps.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// How the counter's read-increment-write sequence is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncrementStrategy {
    /// One exclusive lock spans read, increment and write.
    #[default]
    Locked,
    /// Unlocked read, then a locked truncate-and-write.
    ///
    /// Concurrent requests can read the same value and lose an update.
    SplitLock,
}

impl fmt::Display for IncrementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Locked => "locked",
            Self::SplitLock => "split-lock",
        })
    }
}

impl FromStr for IncrementStrategy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" => Ok(Self::Locked),
            "split-lock" | "split" => Ok(Self::SplitLock),
            other => Err(SettingsError::InvalidValue {
                field: "increment",
                value: other.to_string(),
            }),
        }
    }
}

/// What happens to the redirect when a storage step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure and redirect anyway.
    #[default]
    BestEffort,
    /// Abort the request with a server error.
    Strict,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BestEffort => "best-effort",
            Self::Strict => "strict",
        })
    }
}

impl FromStr for FailurePolicy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "besteffort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => Err(SettingsError::InvalidValue {
                field: "failure-policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Settings validation errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Resource path cannot be empty")]
    EmptyResourcePath,

    #[error("Resource path contains a control character: {0:?}")]
    ControlCharInResourcePath(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Everything the recorder and the storage adapters need to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallySettings {
    /// Download log location.
    pub log_file: PathBuf,

    /// Counter file location.
    pub counter_file: PathBuf,

    /// Redirect target, also recorded in each log line.
    pub resource_path: String,

    /// IANA timezone name used for log timestamps.
    pub timezone: String,

    /// Counter update protocol.
    pub increment: IncrementStrategy,

    /// Whether storage failures abort the redirect.
    pub failure_policy: FailurePolicy,
}

impl Default for TallySettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            counter_file: PathBuf::from(DEFAULT_COUNTER_FILE),
            resource_path: DEFAULT_RESOURCE_PATH.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            increment: IncrementStrategy::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl TallySettings {
    /// Parse the configured timezone.
    pub fn timezone(&self) -> Result<Tz, SettingsError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SettingsError::UnknownTimezone(self.timezone.clone()))
    }

    /// Check the settings can be used to serve requests.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.resource_path.trim().is_empty() {
            return Err(SettingsError::EmptyResourcePath);
        }
        // Tabs and newlines would split the log line into extra fields
        if self.resource_path.chars().any(char::is_control) {
            return Err(SettingsError::ControlCharInResourcePath(
                self.resource_path.clone(),
            ));
        }
        self.timezone()?;
        Ok(())
    }
}
