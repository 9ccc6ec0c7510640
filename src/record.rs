//! Record - the single entity type held by a store.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Always positive once issued.
pub type RecordId = u64;

/// A persisted `{ id, name }` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
}

impl Record {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Input for `RecordStore::create`. The store picks the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
}

impl NewRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Input for `RecordStore::update`. Replaces the name, never the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub name: String,
}

impl RecordPatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn apply(self, record: &mut Record) {
        record.name = self.name;
    }
}
