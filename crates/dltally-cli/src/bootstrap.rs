//! CLI bootstrap - the composition root for non-server commands.

use std::path::PathBuf;

use dltally_core::{DirectoryCreationStrategy, Stores, TallySettings, data_root};
use dltally_store::StoreFactory;

use crate::error::CliError;
use crate::parser::Cli;

/// Configuration assembled from global CLI arguments.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub tally: TallySettings,
}

impl CliConfig {
    /// Build from parsed arguments (flags, env and `.env` already merged by clap).
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            tally: TallySettings {
                log_file: cli.log_file.clone(),
                counter_file: cli.counter_file.clone(),
                resource_path: cli.resource_path.clone(),
                timezone: cli.timezone.clone(),
                increment: cli.increment,
                failure_policy: cli.failure_policy,
            },
        }
    }
}

/// Services available to command handlers.
pub struct CliContext {
    pub root: PathBuf,
    pub settings: TallySettings,
    pub stores: Stores,
}

/// Wire the stores. `strategy` decides whether missing directories are created.
pub fn bootstrap(
    config: &CliConfig,
    strategy: DirectoryCreationStrategy,
) -> Result<CliContext, CliError> {
    config.tally.validate()?;
    let root = data_root(config.data_dir.as_deref())?;
    let stores = StoreFactory::build_stores(&config.tally, &root, strategy)?;

    tracing::debug!(target: "dltally.paths", root = %root.display(), "CLI bootstrap resolved data root");

    Ok(CliContext {
        root,
        settings: config.tally.clone(),
        stores,
    })
}
