//! Click entity representing a single resolved visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A click recorded when a shortcode is resolved.
///
/// `user_agent` and `referrer` are opaque strings taken from the requesting
/// context; either may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}

/// Request metadata captured at resolution time.
///
/// Turned into a [`ClickEvent`] once the resolution instant is known.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClickContext {
    /// Creates a new click context.
    ///
    /// Empty strings are treated as absent values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let context = ClickContext::new(Some("Mozilla/5.0"), Some("https://google.com"));
    /// let click = context.at(Utc::now());
    /// ```
    pub fn new(user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            user_agent: user_agent.filter(|s| !s.is_empty()).map(|s| s.to_string()),
            referrer: referrer.filter(|s| !s.is_empty()).map(|s| s.to_string()),
        }
    }

    /// Stamps the context with the click time.
    pub fn at(self, timestamp: DateTime<Utc>) -> ClickEvent {
        ClickEvent {
            timestamp,
            user_agent: self.user_agent,
            referrer: self.referrer,
        }
    }
}
