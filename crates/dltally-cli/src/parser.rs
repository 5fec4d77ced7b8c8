//! Main CLI parser and top-level argument handling.
//!
//! Global options describe the tally files and apply to every subcommand.
//! Each one can also come from the environment (or a `.env` file).

use std::path::PathBuf;

use clap::Parser;
use dltally_core::{
    DEFAULT_COUNTER_FILE, DEFAULT_LOG_FILE, DEFAULT_RESOURCE_PATH, DEFAULT_TIMEZONE,
    FailurePolicy, IncrementStrategy,
};

use crate::commands::Commands;

/// Command-line interface for the download tally service.
#[derive(Parser)]
#[command(name = "dltally")]
#[command(about = "Log downloads, count them, and redirect to the artifact")]
#[command(version)]
pub struct Cli {
    /// Directory relative file names are resolved against (default: current directory)
    #[arg(long = "data-dir", env = "DLTALLY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Download log file
    #[arg(long = "log-file", env = "DLTALLY_LOG_FILE", global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Counter file
    #[arg(long = "counter-file", env = "DLTALLY_COUNTER_FILE", global = true, default_value = DEFAULT_COUNTER_FILE)]
    pub counter_file: PathBuf,

    /// Redirect target recorded in every log line
    #[arg(long = "resource-path", env = "DLTALLY_RESOURCE_PATH", global = true, default_value = DEFAULT_RESOURCE_PATH)]
    pub resource_path: String,

    /// IANA timezone for log timestamps
    #[arg(long, env = "DLTALLY_TIMEZONE", global = true, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Counter update protocol: locked | split-lock
    #[arg(long, env = "DLTALLY_INCREMENT", global = true, default_value_t = IncrementStrategy::Locked)]
    pub increment: IncrementStrategy,

    /// Storage failure handling: best-effort | strict
    #[arg(long = "failure-policy", env = "DLTALLY_FAILURE_POLICY", global = true, default_value_t = FailurePolicy::BestEffort)]
    pub failure_policy: FailurePolicy,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dltally", "count"]);
        assert_eq!(cli.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(cli.counter_file, PathBuf::from(DEFAULT_COUNTER_FILE));
        assert_eq!(cli.resource_path, DEFAULT_RESOURCE_PATH);
        assert_eq!(cli.increment, IncrementStrategy::Locked);
        assert_eq!(cli.failure_policy, FailurePolicy::BestEffort);
        assert!(matches!(cli.command, Some(Commands::Count)));
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "dltally",
            "--verbose",
            "--data-dir",
            "/srv/edu",
            "--increment",
            "split-lock",
            "--failure-policy",
            "strict",
            "init",
            "--force",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/edu")));
        assert_eq!(cli.increment, IncrementStrategy::SplitLock);
        assert_eq!(cli.failure_policy, FailurePolicy::Strict);
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }

    #[test]
    fn test_invalid_strategy_is_rejected() {
        let result = Cli::try_parse_from(["dltally", "--increment", "sometimes", "count"]);
        assert!(result.is_err());
    }
}
