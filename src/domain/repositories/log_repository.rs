//! Repository trait for the persisted activity log.

use crate::domain::entities::{LogEntry, NewLogEntry};
use crate::error::AppError;

/// Repository interface for a bounded, insertion-ordered activity log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvLogRepository`] - key-value store implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LogRepository: Send + Sync {
    /// Appends an entry, assigning it the next id. Oldest entries are evicted
    /// once the capacity is exceeded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn append(&self, new_entry: NewLogEntry) -> Result<LogEntry, AppError>;

    /// Returns all retained entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn list(&self) -> Result<Vec<LogEntry>, AppError>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn clear(&self) -> Result<(), AppError>;
}
