//! Key-value store trait and error types.

use thiserror::Error;

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupted: {0}")]
    Corrupted(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Synchronous string key-value store.
///
/// Values are opaque strings; callers serialize whole documents into a
/// single key. Implementations only need interior mutability to be shared
/// behind an `Arc`, there is no transactional guarantee across calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - in-process map
/// - [`crate::infrastructure::store::FileStore`] - JSON file on disk
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] if the backend has no room left
    /// and [`StoreError::Io`] if the write could not be completed.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
