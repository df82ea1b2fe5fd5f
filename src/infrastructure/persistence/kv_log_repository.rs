//! Key-value implementation of the activity log repository.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{LogEntry, NewLogEntry};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;
use crate::infrastructure::store::KeyValueStore;

/// Store key holding the activity log.
pub const LOGS_KEY: &str = "shortener_logs";

/// Default maximum number of retained log entries.
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Log repository keeping a bounded FIFO of entries under [`LOGS_KEY`].
///
/// Appending past `capacity` evicts the oldest entries first.
pub struct KvLogRepository {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
}

impl KvLogRepository {
    /// Creates a repository retaining [`DEFAULT_LOG_CAPACITY`] entries.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_capacity(store, DEFAULT_LOG_CAPACITY)
    }

    /// Creates a repository retaining at most `capacity` entries.
    pub fn with_capacity(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn load(&self) -> Result<Vec<LogEntry>, AppError> {
        match self.store.get(LOGS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::storage_failure(
                    "Log collection is corrupted",
                    json!({ "key": LOGS_KEY, "reason": e.to_string() }),
                )
            }),
        }
    }

    fn save(&self, entries: &[LogEntry]) -> Result<(), AppError> {
        let raw = serde_json::to_string(entries).map_err(|e| {
            AppError::storage_failure(
                "Failed to serialize log collection",
                json!({ "reason": e.to_string() }),
            )
        })?;

        self.store.set(LOGS_KEY, &raw)?;
        Ok(())
    }
}

impl LogRepository for KvLogRepository {
    fn append(&self, new_entry: NewLogEntry) -> Result<LogEntry, AppError> {
        let mut entries = self.load()?;

        let id = entries.last().map_or(1, |last| last.id + 1);
        let entry = LogEntry::new(id, new_entry);
        entries.push(entry.clone());

        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }

        self.save(&entries)?;
        Ok(entry)
    }

    fn list(&self) -> Result<Vec<LogEntry>, AppError> {
        self.load()
    }

    fn clear(&self) -> Result<(), AppError> {
        self.store.remove(LOGS_KEY)?;
        Ok(())
    }
}
