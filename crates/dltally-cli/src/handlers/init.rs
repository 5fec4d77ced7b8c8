//! `init` - create the counter file at zero.

use std::io::Write;

use dltally_core::{CoreError, resolve_data_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, force: bool, out: &mut impl Write) -> Result<(), CliError> {
    let path = resolve_data_path(&ctx.root, &ctx.settings.counter_file)?;
    if ctx.stores.counter.initialize(force).map_err(CoreError::from)? {
        writeln!(out, "Initialized {} to 0", path.display())?;
    } else {
        let current = ctx.stores.counter.current().map_err(CoreError::from)?;
        writeln!(
            out,
            "{} already exists (count {current}); use --force to reset",
            path.display()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use dltally_core::{DirectoryCreationStrategy, TallySettings};
    use tempfile::tempdir;

    fn context(dir: &std::path::Path) -> CliContext {
        let config = CliConfig {
            data_dir: Some(dir.to_path_buf()),
            tally: TallySettings {
                counter_file: "state/counter.txt".into(),
                ..TallySettings::default()
            },
        };
        bootstrap(&config, DirectoryCreationStrategy::AutoCreate).unwrap()
    }

    #[test]
    fn creates_counter_at_zero() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());

        let mut out = Vec::new();
        execute(&ctx, false, &mut out).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("state/counter.txt")).unwrap(),
            "0"
        );
        assert!(String::from_utf8(out).unwrap().starts_with("Initialized"));
    }

    #[test]
    fn reports_absolute_counter_path_unchanged() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let counter = elsewhere.path().join("counter.txt");
        let config = CliConfig {
            data_dir: Some(dir.path().to_path_buf()),
            tally: TallySettings {
                counter_file: counter.clone(),
                ..TallySettings::default()
            },
        };
        let ctx = bootstrap(&config, DirectoryCreationStrategy::AutoCreate).unwrap();

        let mut out = Vec::new();
        execute(&ctx, false, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            format!("Initialized {} to 0", counter.display())
        );
        assert_eq!(std::fs::read_to_string(&counter).unwrap(), "0");
    }

    #[test]
    fn keeps_existing_counter_without_force() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        std::fs::write(dir.path().join("state/counter.txt"), "9").unwrap();

        let mut out = Vec::new();
        execute(&ctx, false, &mut out).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("state/counter.txt")).unwrap(),
            "9"
        );
        assert!(String::from_utf8(out).unwrap().contains("count 9"));

        execute(&ctx, true, &mut Vec::new()).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("state/counter.txt")).unwrap(),
            "0"
        );
    }
}
