//! CSV table backend

use super::row::{from_record, header, to_record};
use super::traits::{OpenStore, ReflectionStore, StorageError, StorageResult};
use crate::form::Reflection;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

/// Reflection table stored as a CSV file
///
/// The table is created atomically: header and first row are written to a
/// temporary file beside it and linked into place only if no table exists
/// yet. Every later append opens the file in append mode and writes one
/// complete record, so rows written earlier (by this or another process)
/// are never rewritten. Writers within one process are serialized by an
/// internal mutex.
pub struct CsvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvStore {
    fn encode(reflection: &Reflection, with_header: bool) -> StorageResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if with_header {
            writer.write_record(header())?;
        }
        writer.write_record(to_record(reflection))?;
        writer
            .into_inner()
            .map_err(|e| StorageError::Io(e.into_error()))
    }

    fn table_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Create the table holding only `reflection`.
    /// Returns `false` when another writer created it first.
    fn create_with(&self, reflection: &Reflection) -> StorageResult<bool> {
        let dir = self.table_dir();
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&Self::encode(reflection, true)?)?;
        staged.as_file().sync_all()?;

        match staged.persist_noclobber(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.error.into()),
        }
    }

    /// Append `reflection` to an existing table
    fn append_to_existing(&self, reflection: &Reflection) -> StorageResult<()> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        let len = file.metadata()?.len();

        let bytes = if len == 0 {
            Self::encode(reflection, true)?
        } else {
            let mut bytes = Vec::new();
            if !ends_with_newline(&mut file)? {
                bytes.push(b'\n');
            }
            bytes.extend(Self::encode(reflection, false)?);
            bytes
        };

        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl OpenStore for CsvStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }
}

impl ReflectionStore for CsvStore {
    fn append(&self, reflection: &Reflection) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        if !self.path.exists() && self.create_with(reflection)? {
            debug!(path = %self.path.display(), "created reflection table");
            return Ok(());
        }
        self.append_to_existing(reflection)?;
        debug!(path = %self.path.display(), "appended reflection row");
        Ok(())
    }

    fn load_all(&self) -> StorageResult<Vec<Reflection>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let expected = header();
        let found: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if found.is_empty() {
            return Ok(Vec::new());
        }
        if found != expected {
            return Err(StorageError::InvalidHeader { expected, found });
        }

        // A header row repeated mid-file (two writers racing on an empty
        // table) carries no data.
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().eq(expected.iter().map(String::as_str)) {
                continue;
            }
            rows.push(from_record(&record, idx + 1)?);
        }
        Ok(rows)
    }

    fn export_bytes(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
