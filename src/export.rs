//! Admin export of the accumulated reflection table

use crate::storage::{ReflectionStore, StorageResult};
use tracing::{info, warn};

/// File name offered for the download
pub const EXPORT_FILE_NAME: &str = "all_reflections.csv";

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The whole table, ready to be saved under `file_name`
    Ready { file_name: &'static str, bytes: Vec<u8> },
    /// Nothing has been submitted yet
    Empty,
}

impl ExportOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, ExportOutcome::Empty)
    }
}

/// Fetch the full table for download
///
/// A missing table is reported as [`ExportOutcome::Empty`], not as an error.
pub fn export(store: &dyn ReflectionStore) -> StorageResult<ExportOutcome> {
    match store.export_bytes()? {
        Some(bytes) => {
            info!(
                location = %store.location().display(),
                bytes = bytes.len(),
                "exporting reflections"
            );
            Ok(ExportOutcome::Ready {
                file_name: EXPORT_FILE_NAME,
                bytes,
            })
        }
        None => {
            warn!(location = %store.location().display(), "no data available yet");
            Ok(ExportOutcome::Empty)
        }
    }
}
