//! Composition utilities for building the file-backed stores.
//!
//! Construction only; no domain logic lives here.

use std::path::Path;
use std::sync::Arc;

use dltally_core::{
    CoreError, DirectoryCreationStrategy, Stores, TallySettings, ensure_parent_dir,
    resolve_data_path,
};

use crate::{FileCounterStore, FileDownloadLog};

/// Factory for the flat-file store implementations.
pub struct StoreFactory;

impl StoreFactory {
    /// Build both stores, resolving relative file names against `root`.
    ///
    /// Parent directories are created according to `strategy`. The files
    /// themselves are not touched.
    pub fn build_stores(
        settings: &TallySettings,
        root: &Path,
        strategy: DirectoryCreationStrategy,
    ) -> Result<Stores, CoreError> {
        let log_path = resolve_data_path(root, &settings.log_file).map_err(path_error)?;
        let counter_path = resolve_data_path(root, &settings.counter_file).map_err(path_error)?;

        ensure_parent_dir(&log_path, strategy).map_err(path_error)?;
        ensure_parent_dir(&counter_path, strategy).map_err(path_error)?;

        Ok(Stores::new(
            Arc::new(FileDownloadLog::new(log_path)),
            Arc::new(FileCounterStore::new(counter_path, settings.increment)),
        ))
    }
}

fn path_error(err: dltally_core::PathError) -> CoreError {
    CoreError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stores_resolve_against_root() {
        let dir = tempdir().unwrap();
        let settings = TallySettings {
            counter_file: "state/counter.txt".into(),
            ..TallySettings::default()
        };

        let stores =
            StoreFactory::build_stores(&settings, dir.path(), DirectoryCreationStrategy::AutoCreate)
                .unwrap();
        assert!(dir.path().join("state").is_dir());

        assert_eq!(stores.counter.increment().unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("state/counter.txt")).unwrap(),
            "1"
        );
    }

    #[test]
    fn missing_directory_is_a_configuration_error_when_creation_disallowed() {
        let dir = tempdir().unwrap();
        let settings = TallySettings {
            log_file: "logs/downloads.txt".into(),
            ..TallySettings::default()
        };

        let result =
            StoreFactory::build_stores(&settings, dir.path(), DirectoryCreationStrategy::Disallow);
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }
}
