//! Key-value repository implementations.
//!
//! Each repository keeps its whole collection as one JSON document under a
//! fixed key and rewrites that document on every mutation.
//!
//! # Repositories
//!
//! - [`KvRecordRepository`] - Shortcode to URL record mapping
//! - [`KvLogRepository`] - Bounded activity log

pub mod kv_log_repository;
pub mod kv_record_repository;

pub use kv_log_repository::{KvLogRepository, LOGS_KEY};
pub use kv_record_repository::{KvRecordRepository, URLS_KEY};
