//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RecordRepository`] - URL record CRUD and click recording
//! - [`LogRepository`] - Bounded activity log
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod log_repository;
pub mod record_repository;

pub use log_repository::LogRepository;
pub use record_repository::RecordRepository;

#[cfg(test)]
pub use log_repository::MockLogRepository;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
