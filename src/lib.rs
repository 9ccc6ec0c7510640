#[cfg(feature = "cli")]
mod config;
mod error;
mod record;
mod store;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "cli")]
pub use config::Config;
pub use error::StoreError;
pub use record::{NewRecord, Record, RecordId, RecordPatch};
pub use store::{InMemoryRecordStore, JsonFileStore, RecordStore};
