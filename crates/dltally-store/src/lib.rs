//! Flat-file implementations of the dltally storage ports.
//!
//! Both files are guarded with `flock`-style advisory locks, which only
//! serialize processes that also lock. Anything editing the files by hand
//! bypasses them.
#![deny(unused_crate_dependencies)]

pub mod counter;
pub mod factory;
mod lock;
pub mod log;

pub use counter::FileCounterStore;
pub use factory::StoreFactory;
pub use log::FileDownloadLog;

#[cfg(test)]
use chrono as _;
#[cfg(test)]
use chrono_tz as _;
#[cfg(test)]
use tempfile as _;
