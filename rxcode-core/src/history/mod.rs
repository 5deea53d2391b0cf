//! Persisted history of generated field sets.

mod kv;
mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::RecordStore;
