//! Local persistence of owners and their records.

pub mod store;
pub mod registry;

pub use registry::{Registry, USERS_KEY, record_key};
pub use store::{DirectoryStore, KeyValueStore, MemoryStore, StoreError};
