//! Storage trait definitions

use crate::form::Reflection;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected table header: expected [{}], found [{}]", .expected.join(", "), .found.join(", "))]
    InvalidHeader {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only table of reflections
///
/// Rows are returned in insertion order. Implementations must be thread-safe
/// (Send + Sync); neither backend rewrites earlier rows when appending.
pub trait ReflectionStore: Send + Sync {
    /// Append one reflection as a new row
    fn append(&self, reflection: &Reflection) -> StorageResult<()>;

    /// Read every row, oldest first. A table that does not exist yet is empty.
    fn load_all(&self) -> StorageResult<Vec<Reflection>>;

    /// The table as a downloadable CSV file, or `None` when there is no data yet
    fn export_bytes(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Where the table lives
    fn location(&self) -> &Path;

    /// Number of rows currently stored
    fn row_count(&self) -> StorageResult<usize> {
        Ok(self.load_all()?.len())
    }
}

/// Extension trait for opening stores from paths
pub trait OpenStore: ReflectionStore + Sized {
    /// Open the store at the given path. Backends may defer creating the
    /// file until the first append.
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;
}
