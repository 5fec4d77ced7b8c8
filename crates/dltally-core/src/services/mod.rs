//! Application services built on top of the ports.

mod recorder;

pub use recorder::{DownloadOutcome, DownloadRecorder};
