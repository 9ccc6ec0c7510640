//! JsonFileStore - the whole collection as one pretty-printed JSON array.
//!
//! Each call reads the file, works on the records in memory, and for writes
//! replaces the file through a `.tmp` sibling and a rename. A missing file is
//! an empty collection.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use super::{filter_by_name, max_id, next_id, position_of, RecordStore};
use crate::error::StoreError;
use crate::record::{NewRecord, Record, RecordId, RecordPatch};

const INDENT: &[u8] = b"    ";

/// File-backed record store.
///
/// Writers are serialized through one mutex, which also guards the highest ID
/// issued so far. Readers skip the lock; the rename means they only ever see
/// a complete file.
pub struct JsonFileStore {
    path: PathBuf,
    writer: Mutex<RecordId>,
}

impl JsonFileStore {
    /// Point a store at `path`. Nothing is touched on disk until the first call.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: Mutex::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "record file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::unavailable(&self.path, err)),
        };

        let records: Vec<Record> =
            serde_json::from_slice(&bytes).map_err(|err| StoreError::Corrupt {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;
        debug!(path = %self.path.display(), count = records.len(), "record file loaded");
        Ok(records)
    }

    fn persist(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::unavailable(parent, err))?;
        }

        let tmp_path = self.tmp_path();
        write_pretty(&tmp_path, records).map_err(|err| {
            discard_tmp(&tmp_path);
            StoreError::unavailable(&tmp_path, err)
        })?;
        replace_with(&tmp_path, &self.path)
            .map_err(|err| StoreError::unavailable(&self.path, err))?;

        debug!(path = %self.path.display(), count = records.len(), "record file written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Load, run `op` against the records and the ID high-water mark, then
    /// write the collection back. Holds the writer lock throughout.
    fn mutate<T, F>(&self, operation: &'static str, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Record>, &mut RecordId) -> Result<T, StoreError>,
    {
        let mut high_water = self
            .writer
            .lock()
            .map_err(|_| StoreError::LockPoisoned(operation))?;

        let mut records = self.load()?;
        *high_water = (*high_water).max(max_id(&records));

        let out = op(&mut records, &mut *high_water)?;
        self.persist(&records)?;
        Ok(out)
    }
}

fn write_pretty(path: &Path, records: &[Record]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut ser).map_err(io::Error::from)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Move `tmp` over `target`, removing `tmp` if the rename fails.
fn replace_with(tmp: &Path, target: &Path) -> io::Result<()> {
    fs::rename(tmp, target).inspect_err(|_| discard_tmp(tmp))
}

/// Best-effort cleanup of a half-written sibling. Never removes directories.
fn discard_tmp(tmp: &Path) {
    if tmp.is_file() {
        if let Err(err) = fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %err, "could not remove temp file");
        }
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        self.load()
    }

    fn get(&self, id: RecordId) -> Result<Record, StoreError> {
        let mut records = self.load()?;
        position_of(&records, id)
            .map(|index| records.swap_remove(index))
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&self, new: NewRecord) -> Result<Record, StoreError> {
        let record = self.mutate("create", |records, high_water| {
            let id = next_id(records, *high_water)?;
            let record = Record { id, name: new.name };
            records.push(record.clone());
            *high_water = id;
            Ok(record)
        })?;
        info!(id = record.id, "record created");
        Ok(record)
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<Record, StoreError> {
        let record = self.mutate("update", |records, _| {
            let index = position_of(records, id).ok_or(StoreError::NotFound { id })?;
            patch.apply(&mut records[index]);
            Ok(records[index].clone())
        })?;
        info!(id, "record updated");
        Ok(record)
    }

    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        self.mutate("delete", |records, _| {
            let index = position_of(records, id).ok_or(StoreError::NotFound { id })?;
            records.remove(index);
            Ok(())
        })?;
        info!(id, "record deleted");
        Ok(())
    }

    fn search(&self, needle: &str) -> Result<Vec<Record>, StoreError> {
        Ok(filter_by_name(self.load()?, needle))
    }
}
