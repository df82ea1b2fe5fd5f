//! Business logic services for the application layer.

pub mod activity_log;
pub mod click_recorder;
pub mod link_service;
pub mod shortcode_allocator;
pub mod stats_service;

pub use activity_log::ActivityLog;
pub use click_recorder::ClickRecorder;
pub use link_service::{LinkService, LinkSettings, Resolution};
pub use shortcode_allocator::{AllocatorSettings, ShortcodeAllocator};
pub use stats_service::StatsService;
