//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for the command-line front end.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening, resolution and record management
//! - [`services::stats_service::StatsService`] - Totals and click analytics
//! - [`services::shortcode_allocator::ShortcodeAllocator`] - Unique shortcode allocation
//! - [`services::activity_log::ActivityLog`] - Persisted activity log

pub mod services;
