//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for storage and persistence.
//!
//! # Modules
//!
//! - [`store`] - Key-value storage backends (in-memory and JSON file)
//! - [`persistence`] - Repository implementations on top of a key-value store

pub mod persistence;
pub mod store;
