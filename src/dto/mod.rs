//! Data transfer objects exchanged with the presentation layer.
//!
//! All DTOs use Serde for (de)serialization and validator for input
//! constraints.

pub mod shorten;
pub mod stats;

pub use shorten::{BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem, UrlItem};
pub use stats::{ClickAnalytics, StatsOverview};
