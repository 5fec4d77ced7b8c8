//! `count` - print the current download count.

use std::io::Write;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, out: &mut impl Write) -> Result<(), CliError> {
    let value = ctx.stores.counter.current().map_err(dltally_core::CoreError::from)?;
    writeln!(out, "{value}")?;
    Ok(())
}
