//! DTOs for URL shortening.

use crate::error::ErrorInfo;
use crate::utils::code_generator::SHORTCODE_PATTERN;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one or more URLs.
///
/// Items are validated one by one so that a bad entry does not reject the
/// whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortenRequest {
    pub urls: Vec<UrlItem>,
}

impl ShortenRequest {
    pub fn new(urls: Vec<UrlItem>) -> Self {
        Self { urls }
    }
}

/// Individual URL to be shortened.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UrlItem {
    /// The URL to shorten. A missing scheme defaults to `https://`.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Optional custom shortcode.
    #[validate(length(
        min = 3,
        max = 20,
        message = "Shortcode must be between 3 and 20 characters"
    ))]
    #[validate(regex(
        path = "*SHORTCODE_PATTERN",
        message = "Shortcode can only contain letters, numbers, hyphens, and underscores"
    ))]
    pub custom_shortcode: Option<String>,

    /// Validity period in minutes (service default when absent).
    #[validate(range(
        min = 1,
        max = 10080,
        message = "Validity must be between 1 and 10080 minutes (7 days)"
    ))]
    pub validity_minutes: Option<u32>,
}

impl UrlItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.custom_shortcode = Some(shortcode.into());
        self
    }

    pub fn with_validity_minutes(mut self, minutes: u32) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    /// Trims the text fields; a blank custom shortcode becomes `None`.
    pub fn trimmed(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
            custom_shortcode: self
                .custom_shortcode
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            validity_minutes: self.validity_minutes,
        }
    }
}

/// Response containing batch processing results in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Individual result for a URL in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success {
        original_url: String,
        shortcode: String,
        short_url: String,
        is_custom_shortcode: bool,
        validity_minutes: u32,
        expires_at: Option<DateTime<Utc>>,
    },
    Error {
        original_url: String,
        error: ErrorInfo,
    },
}

impl ShortenResultItem {
    pub fn is_success(&self) -> bool {
        matches!(self, ShortenResultItem::Success { .. })
    }

    pub fn original_url(&self) -> &str {
        match self {
            ShortenResultItem::Success { original_url, .. }
            | ShortenResultItem::Error { original_url, .. } => original_url,
        }
    }
}

/// Summary statistics for batch processing.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
