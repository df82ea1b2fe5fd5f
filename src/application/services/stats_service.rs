//! Statistics and click analytics service.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use serde_json::json;

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickEvent, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::dto::stats::{ClickAnalytics, StatsOverview};
use crate::error::AppError;
use crate::utils::time_ago;

/// Number of clicks listed in the "recent clicks" section.
pub const RECENT_CLICKS_LIMIT: usize = 10;

/// Read-only aggregation over stored records.
pub struct StatsService<R: RecordRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: RecordRepository> StatsService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Totals across all records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    pub fn overview(&self) -> Result<StatsOverview, AppError> {
        let records = self.repository.list()?;
        Ok(overview_of(records.values()))
    }

    /// Click breakdown for one record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `shortcode`.
    /// Returns [`AppError::StorageFailure`] on storage errors.
    pub fn analytics(&self, shortcode: &str) -> Result<ClickAnalytics, AppError> {
        let record = self.repository.get(shortcode)?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "shortcode": shortcode }))
        })?;

        Ok(click_analytics(&record.click_history))
    }

    /// Relative age of `then` against the service clock.
    pub fn time_ago(&self, then: DateTime<Utc>) -> String {
        time_ago::time_ago(then, self.clock.now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

pub fn overview_of<'a>(records: impl IntoIterator<Item = &'a UrlRecord>) -> StatsOverview {
    records
        .into_iter()
        .fold(StatsOverview::default(), |mut acc, record| {
            acc.total_urls += 1;
            acc.total_clicks += record.click_count;
            if record.is_custom_shortcode {
                acc.custom_shortcodes += 1;
            }
            acc
        })
}

/// Buckets clicks by UTC day (`YYYY-MM-DD`) and hour, and lists the latest
/// ten newest first.
pub fn click_analytics(history: &[ClickEvent]) -> ClickAnalytics {
    let mut clicks_by_day = BTreeMap::new();
    let mut clicks_by_hour = BTreeMap::new();

    for click in history {
        let day = click.timestamp.format("%Y-%m-%d").to_string();
        *clicks_by_day.entry(day).or_insert(0) += 1;
        *clicks_by_hour.entry(click.timestamp.hour()).or_insert(0) += 1;
    }

    ClickAnalytics {
        total_clicks: history.len(),
        clicks_by_day,
        clicks_by_hour,
        recent_clicks: history
            .iter()
            .rev()
            .take(RECENT_CLICKS_LIMIT)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::entities::{ClickContext, NewUrlRecord};
    use crate::domain::repositories::MockRecordRepository;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
    }

    fn record(shortcode: &str, custom: bool, clicks: &[DateTime<Utc>]) -> UrlRecord {
        let mut record = UrlRecord::from_new(NewUrlRecord {
            shortcode: shortcode.to_string(),
            original_url: "https://example.com/".to_string(),
            is_custom_shortcode: custom,
            validity_minutes: 30,
            created_at: at(1, 0, 0),
        });
        for ts in clicks {
            record.push_click(ClickContext::default().at(*ts));
        }
        record
    }

    fn service(repo: MockRecordRepository) -> StatsService<MockRecordRepository> {
        StatsService::new(Arc::new(repo), Arc::new(ManualClock::new(at(2, 12, 0))))
    }

    #[test]
    fn test_overview_totals() {
        let mut repo = MockRecordRepository::new();
        repo.expect_list().returning(|| {
            Ok(BTreeMap::from([
                ("a".to_string(), record("a", true, &[at(1, 1, 0), at(1, 2, 0)])),
                ("b".to_string(), record("b", false, &[at(1, 3, 0)])),
                ("c".to_string(), record("c", true, &[])),
            ]))
        });

        let overview = service(repo).overview().unwrap();
        assert_eq!(
            overview,
            StatsOverview {
                total_urls: 3,
                total_clicks: 3,
                custom_shortcodes: 2,
            }
        );
    }

    #[test]
    fn test_overview_empty() {
        let mut repo = MockRecordRepository::new();
        repo.expect_list().returning(|| Ok(BTreeMap::new()));

        assert_eq!(service(repo).overview().unwrap(), StatsOverview::default());
    }

    #[test]
    fn test_click_analytics_buckets() {
        let history: Vec<ClickEvent> = [at(1, 9, 0), at(1, 9, 30), at(1, 23, 59), at(2, 9, 5)]
            .into_iter()
            .map(|ts| ClickContext::default().at(ts))
            .collect();

        let analytics = click_analytics(&history);

        assert_eq!(analytics.total_clicks, 4);
        assert_eq!(analytics.clicks_by_day["2024-06-01"], 3);
        assert_eq!(analytics.clicks_by_day["2024-06-02"], 1);
        assert_eq!(analytics.clicks_by_hour[&9], 3);
        assert_eq!(analytics.clicks_by_hour[&23], 1);
        assert_eq!(analytics.recent_clicks[0].timestamp, at(2, 9, 5));
    }

    #[test]
    fn test_recent_clicks_capped_newest_first() {
        let history: Vec<ClickEvent> = (0..15)
            .map(|i| ClickContext::default().at(at(1, 0, 0) + Duration::minutes(i)))
            .collect();

        let recent = click_analytics(&history).recent_clicks;

        assert_eq!(recent.len(), RECENT_CLICKS_LIMIT);
        assert_eq!(recent[0].timestamp, at(1, 0, 14));
        assert_eq!(recent[9].timestamp, at(1, 0, 5));
    }

    #[test]
    fn test_analytics_unknown_code() {
        let mut repo = MockRecordRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        assert!(matches!(
            service(repo).analytics("nope").unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[test]
    fn test_time_ago_uses_clock() {
        let svc = service(MockRecordRepository::new());
        assert_eq!(svc.time_ago(at(2, 10, 0)), "2 hours ago");
    }
}
