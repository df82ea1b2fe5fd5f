//! Synchronous key-value storage backends.
//!
//! Provides a [`KeyValueStore`] trait with two implementations:
//! - [`MemoryStore`] - Process-local map with an optional byte quota
//! - [`FileStore`] - All keys kept in a single JSON file on disk

mod file_store;
mod memory_store;
mod service;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use service::{KeyValueStore, StoreError, StoreResult};
