//! Resolution-time expiry policy.
//!
//! Expiry is advisory: it never deletes or mutates a record, it only decides
//! whether a resolution may proceed.

use chrono::{DateTime, Utc};

use crate::domain::entities::UrlRecord;

/// Returns true if `record` is no longer valid at `now`.
///
/// A record without `expires_at` never expires. The expiry instant itself is
/// still valid; only strictly later instants are expired.
pub fn is_expired(record: &UrlRecord, now: DateTime<Utc>) -> bool {
    record.expires_at.is_some_and(|expires_at| now > expires_at)
}
