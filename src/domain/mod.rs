//! Domain layer containing business entities and policies.
//!
//! Defines the records the shortener persists, the repository interfaces the
//! application layer depends on, and the small policies (expiry, time source)
//! that do not need storage.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`expiry`] - Resolution-time validity check
//! - [`clock`] - Injectable time source
//!
//! # Design Principles
//!
//! - Entities and policies do not depend on infrastructure or presentation layers
//! - Repository traits report failures as [`crate::error::AppError`], which
//!   wraps backend [`crate::infrastructure::store::StoreError`]s
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod clock;
pub mod entities;
pub mod expiry;
pub mod repositories;
