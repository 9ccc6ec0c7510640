//! Record stores - CRUD and name search over a single collection of records.
//!
//! Every implementation follows the same cycle: read the whole collection,
//! mutate it in memory, and (for writes) put the whole collection back.
//! There is no index; lookups are linear scans.
//!
//! ## Example
//!
//! ```ignore
//! use item_store::{JsonFileStore, NewRecord, RecordStore};
//!
//! let store = JsonFileStore::open("data.json");
//! let apple = store.create(NewRecord::new("Apple"))?;
//! assert_eq!(store.get(apple.id)?.name, "Apple");
//! let hits = store.search("app")?;
//! ```

mod file;
mod in_memory;

use crate::error::StoreError;
use crate::record::{NewRecord, Record, RecordId, RecordPatch};

pub use file::JsonFileStore;
pub use in_memory::InMemoryRecordStore;

/// Abstract storage for the record collection.
pub trait RecordStore: Send + Sync {
    /// All records in stored order.
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// The record with this ID, or `StoreError::NotFound`.
    fn get(&self, id: RecordId) -> Result<Record, StoreError>;

    /// Append a record under the next free ID and return it.
    fn create(&self, new: NewRecord) -> Result<Record, StoreError>;

    /// Replace the name of an existing record. ID and position are kept.
    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<Record, StoreError>;

    /// Remove a record. Fails with `StoreError::NotFound` if it is absent.
    fn delete(&self, id: RecordId) -> Result<(), StoreError>;

    /// Records whose name contains `needle`, ignoring case, in stored order.
    /// An empty needle matches everything.
    fn search(&self, needle: &str) -> Result<Vec<Record>, StoreError>;
}

/// Next ID to hand out: one past the larger of the highest stored ID and the
/// highest ID this store has ever issued. Fails once `RecordId::MAX` is taken.
pub(crate) fn next_id(records: &[Record], high_water: RecordId) -> Result<RecordId, StoreError> {
    max_id(records)
        .max(high_water)
        .checked_add(1)
        .ok_or(StoreError::IdSpaceExhausted)
}

/// Highest stored ID, or 0 for an empty collection.
pub(crate) fn max_id(records: &[Record]) -> RecordId {
    records.iter().map(|record| record.id).max().unwrap_or(0)
}

pub(crate) fn position_of(records: &[Record], id: RecordId) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

pub(crate) fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Shared `search` body: filter a snapshot, keeping stored order.
pub(crate) fn filter_by_name(records: Vec<Record>, needle: &str) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| name_matches(&record.name, needle))
        .collect()
}
