//! # Local URL Shortener
//!
//! A single-user URL shortener that keeps everything in a local key-value
//! store: shortcodes, their destinations, click history and an activity log.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, expiry policy, clock and repository traits
//! - **Application Layer** ([`application`]) - Shortcode allocation, shortening, resolution and stats
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value stores and the repositories built on them
//! - **DTO Layer** ([`dto`]) - Batch requests, per-item results and statistics views
//!
//! The `shortener` binary is the presentation layer.
//!
//! ## Features
//!
//! - Batches of up to five URLs, each succeeding or failing on its own
//! - Custom or generated shortcodes with a time-derived fallback
//! - Per-link validity with expiry checked at resolution time
//! - Click history with daily and hourly breakdowns
//! - Bounded activity log persisted next to the records
//!
//! ## Quick Start
//!
//! ```bash
//! shortener shorten example.com https://rust-lang.org --validity 60
//! shortener open <code>
//! shortener stats
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod dto;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ActivityLog, AllocatorSettings, LinkService, LinkSettings, Resolution, StatsService,
    };
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{ClickContext, ClickEvent, LogEntry, LogLevel, UrlRecord};
    pub use crate::dto::{ShortenRequest, ShortenResponse, ShortenResultItem, UrlItem};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::state::AppState;
}
