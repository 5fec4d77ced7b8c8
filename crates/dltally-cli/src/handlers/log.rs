//! `log` - print the most recent download log entries, oldest first.

use std::io::Write;

use dltally_core::CoreError;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, tail: usize, out: &mut impl Write) -> Result<(), CliError> {
    let entries = ctx.stores.log.read_recent(tail).map_err(CoreError::from)?;

    for entry in &entries {
        writeln!(
            out,
            "{}  {:<39}  {}",
            entry.timestamp, entry.client_address, entry.resource_path
        )?;
    }
    Ok(())
}
