//! InMemoryRecordStore - Vec-backed record store for testing and development.

use std::sync::{Arc, RwLock};

use tracing::info;

use super::{filter_by_name, next_id, position_of, RecordStore};
use crate::error::StoreError;
use crate::record::{NewRecord, Record, RecordId, RecordPatch};

#[derive(Default)]
struct Collection {
    records: Vec<Record>,
    high_water: RecordId,
}

/// In-memory record store.
///
/// Keeps insertion order like the file store does. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<Collection>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records, kept in the given order.
    pub fn with_records(records: Vec<Record>) -> Self {
        let high_water = super::max_id(&records);
        Self {
            storage: Arc::new(RwLock::new(Collection {
                records,
                high_water,
            })),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Collection>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Collection>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read()?.records.clone())
    }

    fn get(&self, id: RecordId) -> Result<Record, StoreError> {
        let storage = self.read()?;
        position_of(&storage.records, id)
            .map(|index| storage.records[index].clone())
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&self, new: NewRecord) -> Result<Record, StoreError> {
        let mut storage = self.write()?;
        let id = next_id(&storage.records, storage.high_water)?;
        let record = Record { id, name: new.name };

        storage.records.push(record.clone());
        storage.high_water = id;
        info!(id, "record created");

        Ok(record)
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<Record, StoreError> {
        let mut storage = self.write()?;
        let index = position_of(&storage.records, id).ok_or(StoreError::NotFound { id })?;

        let record = &mut storage.records[index];
        patch.apply(record);
        info!(id, "record updated");

        Ok(record.clone())
    }

    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut storage = self.write()?;
        let index = position_of(&storage.records, id).ok_or(StoreError::NotFound { id })?;

        storage.records.remove(index);
        info!(id, "record deleted");

        Ok(())
    }

    fn search(&self, needle: &str) -> Result<Vec<Record>, StoreError> {
        Ok(filter_by_name(self.list()?, needle))
    }
}
