//! Link creation, resolution and management service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use validator::Validate;

use crate::application::services::activity_log::ActivityLog;
use crate::application::services::click_recorder::ClickRecorder;
use crate::application::services::shortcode_allocator::{AllocatorSettings, ShortcodeAllocator};
use crate::config::Config;
use crate::domain::clock::Clock;
use crate::domain::entities::{ClickContext, NewUrlRecord, UrlRecord, UrlRecordPatch};
use crate::domain::repositories::{LogRepository, RecordRepository};
use crate::dto::shorten::{
    BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem, UrlItem,
};
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 5;

/// Tunables for [`LinkService`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSettings {
    /// Prefix for short URLs, without trailing slash.
    pub base_url: String,
    /// Validity applied when an item does not specify one.
    pub default_validity_minutes: u32,
    /// Largest accepted batch.
    pub max_batch_size: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl From<&Config> for LinkSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            default_validity_minutes: config.default_validity_minutes,
            max_batch_size: config.max_batch_size,
        }
    }
}

/// Outcome of resolving a shortcode.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The record is live; a click was recorded.
    Redirect { original_url: String },
    /// The record exists but its validity has passed. No click is recorded.
    Expired { expires_at: DateTime<Utc> },
    NotFound,
}

/// Service for shortening, resolving and managing links.
///
/// Handles validation, URL normalization, shortcode allocation and click
/// recording. Every user-visible step is written to the activity log.
pub struct LinkService<R: RecordRepository, L: LogRepository> {
    repository: Arc<R>,
    allocator: ShortcodeAllocator<R, L>,
    clicks: ClickRecorder<R>,
    activity: Arc<ActivityLog<L>>,
    clock: Arc<dyn Clock>,
    settings: LinkSettings,
}

impl<R: RecordRepository, L: LogRepository> LinkService<R, L> {
    pub fn new(
        repository: Arc<R>,
        activity: Arc<ActivityLog<L>>,
        clock: Arc<dyn Clock>,
        allocator_settings: AllocatorSettings,
        settings: LinkSettings,
    ) -> Self {
        Self {
            allocator: ShortcodeAllocator::new(
                Arc::clone(&repository),
                Arc::clone(&activity),
                Arc::clone(&clock),
                allocator_settings,
            ),
            clicks: ClickRecorder::new(Arc::clone(&repository)),
            repository,
            activity,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Shortens every URL of the request, in submission order.
    ///
    /// Items succeed or fail independently; a failed item never aborts the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFormat`] if the request is empty or larger
    /// than `max_batch_size`.
    pub async fn shorten_batch(&self, request: ShortenRequest) -> Result<ShortenResponse, AppError> {
        let total = request.urls.len();

        if total == 0 {
            return Err(AppError::invalid_format(
                "At least one URL is required",
                json!({ "provided": 0 }),
            ));
        }

        if total > self.settings.max_batch_size {
            return Err(AppError::invalid_format(
                format!("Maximum {} URLs allowed", self.settings.max_batch_size),
                json!({ "provided": total, "max": self.settings.max_batch_size }),
            ));
        }

        let mut items = Vec::with_capacity(total);

        for item in request.urls {
            let original_url = item.url.clone();

            let result = match self.shorten_one(item).await {
                Ok(record) => ShortenResultItem::Success {
                    short_url: self.short_url(&record.shortcode),
                    original_url: record.original_url,
                    shortcode: record.shortcode,
                    is_custom_shortcode: record.is_custom_shortcode,
                    validity_minutes: record.validity_minutes,
                    expires_at: record.expires_at,
                },
                Err(e) => ShortenResultItem::Error {
                    original_url,
                    error: e.to_error_info(),
                },
            };

            items.push(result);
        }

        let successful = items.iter().filter(|i| i.is_success()).count();
        self.activity
            .info("URLs processed", json!({ "count": total, "successful": successful }));

        Ok(ShortenResponse {
            summary: BatchSummary {
                total,
                successful,
                failed: total - successful,
            },
            items,
        })
    }

    /// Shortens a single URL and persists the record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFormat`] for a malformed URL, custom code or validity.
    /// Returns [`AppError::Collision`] if the custom code is taken.
    /// Returns [`AppError::StorageFailure`] if the record cannot be written.
    pub async fn shorten_one(&self, item: UrlItem) -> Result<UrlRecord, AppError> {
        let item = item.trimmed();

        if let Err(errors) = item.validate() {
            let err = AppError::from(errors);
            self.activity.warn(
                "Form validation failed",
                json!({ "url": item.url, "error": err.to_string() }),
            );
            return Err(err);
        }

        let original_url = normalize_url(&item.url).map_err(|e| {
            AppError::invalid_format(
                "Please enter a valid URL",
                json!({ "url": item.url, "reason": e.to_string() }),
            )
        })?;

        let validity_minutes = item
            .validity_minutes
            .unwrap_or(self.settings.default_validity_minutes);

        let shortcode = self
            .allocator
            .allocate(item.custom_shortcode.as_deref())
            .await?;

        let new_record = NewUrlRecord {
            shortcode: shortcode.clone(),
            original_url: original_url.clone(),
            is_custom_shortcode: item.custom_shortcode.is_some(),
            validity_minutes,
            created_at: self.clock.now(),
        };

        match self.repository.create(new_record) {
            Ok(record) => {
                metrics::counter!("shortener_links_created_total").increment(1);
                self.activity.info(
                    "URL shortened successfully",
                    json!({ "shortcode": shortcode, "originalUrl": original_url }),
                );
                Ok(record)
            }
            Err(e) => {
                self.activity.error(
                    "Failed to save URL",
                    json!({ "shortcode": shortcode, "originalUrl": original_url, "error": e.to_string() }),
                );
                Err(e)
            }
        }
    }

    /// Resolves a shortcode, recording a click when the record is live.
    ///
    /// A failure to record the click is logged and the redirect still
    /// happens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] if the record cannot be read.
    pub fn resolve(&self, shortcode: &str, context: ClickContext) -> Result<Resolution, AppError> {
        self.activity
            .info("Redirect attempt", json!({ "shortcode": shortcode }));

        let Some(record) = self.repository.get(shortcode)? else {
            self.activity
                .warn("Short URL not found", json!({ "shortcode": shortcode }));
            return Ok(Resolution::NotFound);
        };

        let now = self.clock.now();

        if let Some(expires_at) = record.expires_at.filter(|_| record.is_expired_at(now)) {
            self.activity.warn(
                "Short URL expired",
                json!({ "shortcode": shortcode, "expiresAt": expires_at }),
            );
            return Ok(Resolution::Expired { expires_at });
        }

        let event = context.at(now);
        let click_data = serde_json::to_value(&event).unwrap_or_default();

        match self.clicks.record_click(shortcode, event) {
            Ok(_) => self.activity.info(
                "Click recorded",
                json!({ "shortcode": shortcode, "clickData": click_data }),
            ),
            Err(e) => self.activity.error(
                "Redirect error",
                json!({ "shortcode": shortcode, "error": e.to_string() }),
            ),
        }

        Ok(Resolution::Redirect {
            original_url: record.original_url,
        })
    }

    /// Retrieves a record by shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::StorageFailure`] on storage errors.
    pub fn get(&self, shortcode: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .get(shortcode)?
            .ok_or_else(|| not_found(shortcode))
    }

    /// All records, oldest first.
    pub fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        let mut records: Vec<UrlRecord> = self.repository.list()?.into_values().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.shortcode.cmp(&b.shortcode))
        });
        Ok(records)
    }

    /// Updates the destination or validity of a record.
    ///
    /// The new destination is normalized like a fresh submission. The expiry
    /// instant fixed at creation is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFormat`] for a malformed URL or out-of-range validity.
    /// Returns [`AppError::NotFound`] if no record matches.
    pub fn update(&self, shortcode: &str, patch: UrlRecordPatch) -> Result<UrlRecord, AppError> {
        let original_url = patch
            .original_url
            .map(|url| {
                normalize_url(&url).map_err(|e| {
                    AppError::invalid_format(
                        "Please enter a valid URL",
                        json!({ "url": url, "reason": e.to_string() }),
                    )
                })
            })
            .transpose()?;

        if let Some(minutes) = patch.validity_minutes
            && !(1..=10080).contains(&minutes)
        {
            return Err(AppError::invalid_format(
                "Validity must be between 1 and 10080 minutes (7 days)",
                json!({ "validity_minutes": minutes }),
            ));
        }

        let record = self.repository.update(
            shortcode,
            UrlRecordPatch {
                original_url,
                validity_minutes: patch.validity_minutes,
            },
        )?;

        self.activity
            .info("URL updated", json!({ "shortcode": shortcode }));

        Ok(record)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::StorageFailure`] on storage errors.
    pub fn delete(&self, shortcode: &str) -> Result<(), AppError> {
        if !self.repository.delete(shortcode)? {
            return Err(not_found(shortcode));
        }

        self.activity
            .info("URL deleted", json!({ "shortcode": shortcode }));

        Ok(())
    }

    /// Empties both the record and the log collections.
    pub fn clear_all(&self) -> Result<(), AppError> {
        self.repository.clear()?;
        self.activity.clear()?;
        tracing::info!("All data cleared");
        Ok(())
    }

    /// Builds the full short URL for a shortcode.
    pub fn short_url(&self, shortcode: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), shortcode)
    }
}

fn not_found(shortcode: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "shortcode": shortcode }))
}
