//! Available subcommands.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Subcommand;
use dltally_axum::bootstrap::{DEFAULT_DOWNLOAD_ROUTE, DEFAULT_PORT};

/// Default number of entries shown by `log`.
pub const DEFAULT_TAIL: usize = 10;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "DLTALLY_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Address to bind
        #[arg(long, env = "DLTALLY_BIND", default_value = "0.0.0.0")]
        bind: IpAddr,
        /// Route that records a download and redirects
        #[arg(long, env = "DLTALLY_ROUTE", default_value = DEFAULT_DOWNLOAD_ROUTE)]
        route: String,
        /// Serve this directory for unmatched paths (where the artifact lives)
        #[arg(long = "static-dir", env = "DLTALLY_STATIC_DIR")]
        static_dir: Option<PathBuf>,
        /// Take the client address from X-Forwarded-For / X-Real-IP
        #[arg(long = "trust-proxy-headers", env = "DLTALLY_TRUST_PROXY_HEADERS")]
        trust_proxy_headers: bool,
        /// Serve GET /api/downloads, which lists client addresses from the log
        #[arg(long = "expose-log", env = "DLTALLY_EXPOSE_LOG")]
        expose_log: bool,
    },

    /// Create the counter file with a value of 0
    Init {
        /// Overwrite an existing counter
        #[arg(short, long)]
        force: bool,
    },

    /// Print the current download count
    Count,

    /// Print the most recent download log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_TAIL)]
        tail: usize,
    },

    /// Show resolved file locations and settings
    Paths,
}
