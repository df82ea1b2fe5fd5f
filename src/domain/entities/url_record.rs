//! URL record entity representing a shortcode and its destination.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::click::ClickEvent;
use crate::domain::expiry;

/// A shortened URL with its click history.
///
/// Serialized with camelCase field names; the URL collection is a JSON
/// object keyed by `shortcode`.
///
/// # Invariants
///
/// - `click_count == click_history.len()`
/// - `expires_at` is computed once at creation and never recomputed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub shortcode: String,
    pub original_url: String,
    pub is_custom_shortcode: bool,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub click_count: u64,
    #[serde(default)]
    pub click_history: Vec<ClickEvent>,
}

impl UrlRecord {
    /// Builds a fresh record: `expires_at = created_at + validity_minutes`,
    /// no clicks.
    pub fn from_new(new_record: NewUrlRecord) -> Self {
        let expires_at =
            new_record.created_at + Duration::minutes(i64::from(new_record.validity_minutes));

        Self {
            shortcode: new_record.shortcode,
            original_url: new_record.original_url,
            is_custom_shortcode: new_record.is_custom_shortcode,
            validity_minutes: new_record.validity_minutes,
            created_at: new_record.created_at,
            expires_at: Some(expires_at),
            click_count: 0,
            click_history: Vec::new(),
        }
    }

    /// Returns true if the record has passed its expiry time at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        expiry::is_expired(self, now)
    }

    /// Appends a click and bumps the counter by one.
    pub fn push_click(&mut self, click: ClickEvent) {
        self.click_history.push(click);
        self.click_count += 1;
    }

    /// Applies a partial update. `expires_at` is left untouched.
    pub fn apply_patch(&mut self, patch: UrlRecordPatch) {
        if let Some(url) = patch.original_url {
            self.original_url = url;
        }
        if let Some(minutes) = patch.validity_minutes {
            self.validity_minutes = minutes;
        }
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlRecord {
    pub shortcode: String,
    pub original_url: String,
    pub is_custom_shortcode: bool,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlRecordPatch {
    pub original_url: Option<String>,
    pub validity_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ClickContext;
    use chrono::TimeZone;

    fn new_record(validity_minutes: u32) -> NewUrlRecord {
        NewUrlRecord {
            shortcode: "abc123".to_string(),
            original_url: "https://example.com/".to_string(),
            is_custom_shortcode: false,
            validity_minutes,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_from_new_computes_expiry() {
        let record = UrlRecord::from_new(new_record(30));

        assert_eq!(record.shortcode, "abc123");
        assert_eq!(record.click_count, 0);
        assert!(record.click_history.is_empty());
        assert_eq!(
            record.expires_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_push_click_keeps_count_in_sync() {
        let mut record = UrlRecord::from_new(new_record(30));

        for _ in 0..3 {
            record.push_click(ClickContext::default().at(record.created_at));
        }

        assert_eq!(record.click_count, 3);
        assert_eq!(record.click_history.len(), 3);
    }

    #[test]
    fn test_apply_patch_does_not_recompute_expiry() {
        let mut record = UrlRecord::from_new(new_record(30));
        let expires_at = record.expires_at;

        record.apply_patch(UrlRecordPatch {
            original_url: Some("https://rust-lang.org/".to_string()),
            validity_minutes: Some(600),
        });

        assert_eq!(record.original_url, "https://rust-lang.org/");
        assert_eq!(record.validity_minutes, 600);
        assert_eq!(record.expires_at, expires_at);
    }

    #[test]
    fn test_json_shape() {
        let record = UrlRecord::from_new(new_record(30));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["originalUrl"], "https://example.com/");
        assert_eq!(value["isCustomShortcode"], false);
        assert_eq!(value["validityMinutes"], 30);
        assert_eq!(value["clickCount"], 0);
        assert!(value["clickHistory"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_without_expiry() {
        let raw = r#"{
            "shortcode": "old",
            "originalUrl": "https://example.com/",
            "isCustomShortcode": true,
            "validityMinutes": 30,
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;

        let record: UrlRecord = serde_json::from_str(raw).unwrap();
        assert!(record.expires_at.is_none());
        assert_eq!(record.click_count, 0);
        assert!(!record.is_expired_at(Utc::now()));
    }
}
