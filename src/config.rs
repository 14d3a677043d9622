//! Store selection
//!
//! The table lives at a fixed, well-known path relative to the working
//! directory unless overridden.

use crate::storage::{CsvStore, OpenStore, ReflectionStore, SqliteStore, StorageResult};
use clap::ValueEnum;
use std::path::PathBuf;

/// Default CSV table, relative to the working directory
pub const DEFAULT_CSV_PATH: &str = "all_reflections.csv";

/// Default SQLite database, relative to the working directory
pub const DEFAULT_SQLITE_PATH: &str = "all_reflections.db";

/// Which backend keeps the reflection table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Overrides the backend's default path
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn new(kind: StoreKind) -> Self {
        Self { kind, path: None }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Path the table is read from and written to
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            PathBuf::from(match self.kind {
                StoreKind::Csv => DEFAULT_CSV_PATH,
                StoreKind::Sqlite => DEFAULT_SQLITE_PATH,
            })
        })
    }

    pub fn open(&self) -> StorageResult<Box<dyn ReflectionStore>> {
        let path = self.resolved_path();
        Ok(match self.kind {
            StoreKind::Csv => Box::new(CsvStore::open(path)?),
            StoreKind::Sqlite => Box::new(SqliteStore::open(path)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_depend_on_backend() {
        assert_eq!(
            StoreConfig::default().resolved_path(),
            PathBuf::from("all_reflections.csv")
        );
        assert_eq!(
            StoreConfig::new(StoreKind::Sqlite).resolved_path(),
            PathBuf::from("all_reflections.db")
        );
    }

    #[test]
    fn explicit_path_wins() {
        let config = StoreConfig::new(StoreKind::Sqlite).with_path("/tmp/custom.db");
        assert_eq!(config.resolved_path(), PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn opens_the_selected_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.db");
        let store = StoreConfig::new(StoreKind::Sqlite).with_path(&path).open().unwrap();
        assert_eq!(store.location(), path.as_path());
        assert!(path.exists());
    }
}
