//! Click recording for resolved shortcodes.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{ClickEvent, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

/// Appends clicks to a record's history.
///
/// Expiry is not checked here; callers decide whether a click should be
/// recorded at all.
pub struct ClickRecorder<R: RecordRepository> {
    repository: Arc<R>,
}

impl<R: RecordRepository> ClickRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records one click, growing the history and the counter by exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `shortcode`.
    /// Returns [`AppError::StorageFailure`] on storage errors.
    pub fn record_click(&self, shortcode: &str, event: ClickEvent) -> Result<UrlRecord, AppError> {
        let record = self
            .repository
            .record_click(shortcode, event)?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "shortcode": shortcode }))
            })?;

        metrics::counter!("shortener_clicks_total").increment(1);

        Ok(record)
    }
}
