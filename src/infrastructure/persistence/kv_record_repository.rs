//! Key-value implementation of the record repository.

use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord, UrlRecordPatch};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::store::KeyValueStore;

/// Store key holding the URL collection.
pub const URLS_KEY: &str = "shortener_urls";

type Records = BTreeMap<String, UrlRecord>;

/// Record repository that serializes the full collection under [`URLS_KEY`].
///
/// Every operation is a read-modify-write of the entire document, so each
/// call is O(total records) and not atomic with respect to other callers.
/// The backend is chosen at runtime as an `Arc<dyn KeyValueStore>`.
pub struct KvRecordRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRecordRepository {
    /// Creates a new repository on top of a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Records, AppError> {
        match self.store.get(URLS_KEY)? {
            None => Ok(Records::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::storage_failure(
                    "URL collection is corrupted",
                    json!({ "key": URLS_KEY, "reason": e.to_string() }),
                )
            }),
        }
    }

    fn save(&self, records: &Records) -> Result<(), AppError> {
        let raw = serde_json::to_string(records).map_err(|e| {
            AppError::storage_failure(
                "Failed to serialize URL collection",
                json!({ "reason": e.to_string() }),
            )
        })?;

        self.store.set(URLS_KEY, &raw).map_err(|e| {
            AppError::storage_failure(
                "Failed to save URL collection",
                json!({ "key": URLS_KEY, "reason": e.to_string() }),
            )
        })
    }
}

impl RecordRepository for KvRecordRepository {
    fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut records = self.load()?;

        if records.contains_key(&new_record.shortcode) {
            return Err(AppError::collision(
                "This shortcode is already in use",
                json!({ "shortcode": new_record.shortcode }),
            ));
        }

        let record = UrlRecord::from_new(new_record);
        records.insert(record.shortcode.clone(), record.clone());
        self.save(&records)?;

        Ok(record)
    }

    fn get(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.load()?.remove(shortcode))
    }

    fn exists(&self, shortcode: &str) -> Result<bool, AppError> {
        Ok(self.load()?.contains_key(shortcode))
    }

    fn update(&self, shortcode: &str, patch: UrlRecordPatch) -> Result<UrlRecord, AppError> {
        let mut records = self.load()?;

        let record = records.get_mut(shortcode).ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "shortcode": shortcode }))
        })?;
        record.apply_patch(patch);
        let updated = record.clone();

        self.save(&records)?;
        Ok(updated)
    }

    fn delete(&self, shortcode: &str) -> Result<bool, AppError> {
        let mut records = self.load()?;

        if records.remove(shortcode).is_none() {
            return Ok(false);
        }

        self.save(&records)?;
        Ok(true)
    }

    fn list(&self) -> Result<BTreeMap<String, UrlRecord>, AppError> {
        self.load()
    }

    fn record_click(
        &self,
        shortcode: &str,
        click: ClickEvent,
    ) -> Result<Option<UrlRecord>, AppError> {
        let mut records = self.load()?;

        let Some(record) = records.get_mut(shortcode) else {
            return Ok(None);
        };
        record.push_click(click);
        let updated = record.clone();

        self.save(&records)?;
        Ok(Some(updated))
    }

    fn clear(&self) -> Result<(), AppError> {
        self.store.remove(URLS_KEY)?;
        Ok(())
    }
}
