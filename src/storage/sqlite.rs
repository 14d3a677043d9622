//! SQLite storage backend for reflections

use super::row::write_table;
use super::traits::{OpenStore, ReflectionStore, StorageResult};
use crate::form::{LinkType, Reflection, SubEntry};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// SQLite-backed reflection table
///
/// One `reflections` table; the autoincrement id preserves submission
/// order. Thread-safe via internal mutex on the connection. Each append is
/// a single INSERT, so concurrent writers are serialized by SQLite's own
/// locking.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reflections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                main_desire TEXT NOT NULL,
                sub_desire_1 TEXT NOT NULL,
                outcome_1 TEXT NOT NULL,
                link_type_1 TEXT NOT NULL,
                sub_desire_2 TEXT NOT NULL,
                outcome_2 TEXT NOT NULL,
                link_type_2 TEXT NOT NULL,
                sub_desire_3 TEXT NOT NULL,
                outcome_3 TEXT NOT NULL,
                link_type_3 TEXT NOT NULL
            );

            -- Readers don't block the single writer
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    /// Create an in-memory store (useful for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Deserialize a reflection from the eleven data columns
    fn row_to_reflection(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reflection> {
        let link = |idx: usize| -> rusqlite::Result<LinkType> {
            let raw: String = row.get(idx)?;
            raw.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
            })
        };

        Ok(Reflection::new(
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            [
                SubEntry::new(row.get::<_, String>(2)?, row.get::<_, String>(3)?, link(4)?),
                SubEntry::new(row.get::<_, String>(5)?, row.get::<_, String>(6)?, link(7)?),
                SubEntry::new(row.get::<_, String>(8)?, row.get::<_, String>(9)?, link(10)?),
            ],
        ))
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path.as_ref())?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl ReflectionStore for SqliteStore {
    fn append(&self, reflection: &Reflection) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let [first, second, third] = &reflection.entries;

        conn.execute(
            r#"
            INSERT INTO reflections (
                name, main_desire,
                sub_desire_1, outcome_1, link_type_1,
                sub_desire_2, outcome_2, link_type_2,
                sub_desire_3, outcome_3, link_type_3
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                reflection.name,
                reflection.main_desire,
                first.sub_desire,
                first.outcome,
                first.link_type.as_str(),
                second.sub_desire,
                second.outcome,
                second.link_type.as_str(),
                third.sub_desire,
                third.outcome,
                third.link_type.as_str(),
            ],
        )?;
        debug!(id = conn.last_insert_rowid(), "inserted reflection row");
        Ok(())
    }

    fn load_all(&self) -> StorageResult<Vec<Reflection>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT name, main_desire,
                    sub_desire_1, outcome_1, link_type_1,
                    sub_desire_2, outcome_2, link_type_2,
                    sub_desire_3, outcome_3, link_type_3
             FROM reflections ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], Self::row_to_reflection)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn export_bytes(&self) -> StorageResult<Option<Vec<u8>>> {
        let rows = self.load_all()?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(write_table(&rows)?))
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn row_count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reflections", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
