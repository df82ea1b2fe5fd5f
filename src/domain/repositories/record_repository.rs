//! Repository trait for URL record data access.

use std::collections::BTreeMap;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord, UrlRecordPatch};
use crate::error::AppError;

/// Repository interface for URL records keyed by shortcode.
///
/// All operations are synchronous. Implementations hold at most one record
/// per shortcode.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvRecordRepository`] - key-value store implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_record.rs`
#[cfg_attr(test, mockall::automock)]
pub trait RecordRepository: Send + Sync {
    /// Creates a new record with zero clicks and `expires_at` derived from
    /// the validity period.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Collision`] if a record already exists for the shortcode.
    /// Returns [`AppError::StorageFailure`] if the collection cannot be read or written.
    fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by shortcode.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn get(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Checks whether a shortcode is taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn exists(&self, shortcode: &str) -> Result<bool, AppError>;

    /// Partially updates a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `shortcode`.
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn update(&self, shortcode: &str, patch: UrlRecordPatch) -> Result<UrlRecord, AppError>;

    /// Deletes a record.
    ///
    /// Returns `Ok(true)` if the record was found and deleted, `Ok(false)` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn delete(&self, shortcode: &str) -> Result<bool, AppError>;

    /// Returns every record keyed by shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn list(&self) -> Result<BTreeMap<String, UrlRecord>, AppError>;

    /// Appends a click to the record's history and increments its counter.
    ///
    /// Returns `Ok(None)` if no record matches `shortcode`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn record_click(&self, shortcode: &str, click: ClickEvent)
    -> Result<Option<UrlRecord>, AppError>;

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    fn clear(&self) -> Result<(), AppError>;
}
