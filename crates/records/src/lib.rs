//! Historic-site recordation records: wire payload model, required-field
//! validation, the array-column codec, and the SQLite-backed store.
//!
//! Records are write-once: the store supports inserts and full-table reads
//! only, listed newest-first.

pub mod codec;
pub mod model;
pub mod store;

pub use model::{NewSiteRecord, REQUIRED_FIELDS, StoredSiteRecord};
pub use store::{RecordStore, StoreError};
