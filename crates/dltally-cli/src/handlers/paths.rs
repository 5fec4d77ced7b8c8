//! `paths` - show resolved file locations and settings.

use std::io::Write;

use dltally_core::{TallySettings, data_root, resolve_data_path};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

pub fn execute(config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    let root = data_root(config.data_dir.as_deref())?;
    let TallySettings {
        log_file,
        counter_file,
        resource_path,
        timezone,
        increment,
        failure_policy,
    } = &config.tally;

    writeln!(out, "Data root:      {}", root.display())?;
    writeln!(out, "Log file:       {}", resolve_data_path(&root, log_file)?.display())?;
    writeln!(out, "Counter file:   {}", resolve_data_path(&root, counter_file)?.display())?;
    writeln!(out, "Resource path:  {resource_path}")?;
    writeln!(out, "Timezone:       {timezone}")?;
    writeln!(out, "Increment:      {increment}")?;
    writeln!(out, "Failure policy: {failure_policy}")?;
    Ok(())
}
