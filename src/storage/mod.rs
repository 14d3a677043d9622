//! Storage backends for reflections
//!
//! Reflections are kept in an append-only table behind the
//! `ReflectionStore` trait. The default backend is `CsvStore`, a
//! spreadsheet-readable CSV file; `SqliteStore` keeps the same rows in a
//! SQLite database.

mod csv_table;
mod row;
mod sqlite;
mod traits;

pub use csv_table::CsvStore;
pub use row::{header, to_record, write_table};
pub use sqlite::SqliteStore;
pub use traits::{OpenStore, ReflectionStore, StorageError, StorageResult};
