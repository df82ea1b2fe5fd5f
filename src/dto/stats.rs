//! DTOs for the statistics dashboard.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::entities::ClickEvent;

/// Totals across every stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsOverview {
    pub total_urls: usize,
    pub total_clicks: u64,
    pub custom_shortcodes: usize,
}

/// Click breakdown for a single record.
///
/// Days are keyed `YYYY-MM-DD` and hours `0..=23`, both in UTC.
/// `recent_clicks` holds the latest clicks, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClickAnalytics {
    pub total_clicks: usize,
    pub clicks_by_day: BTreeMap<String, u64>,
    pub clicks_by_hour: BTreeMap<u32, u64>,
    pub recent_clicks: Vec<ClickEvent>,
}
