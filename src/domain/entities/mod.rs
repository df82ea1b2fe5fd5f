//! Core domain entities representing the persisted data model.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A shortcode mapped to its destination, with click history
//! - [`ClickEvent`] - A single recorded visit
//! - [`LogEntry`] - A persisted activity log line
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewUrlRecord`, `NewLogEntry` - For creating new records
//! - `UrlRecordPatch` - For partial updates
//! - `ClickContext` - Request metadata before it is stamped into a `ClickEvent`

pub mod click;
pub mod log_entry;
pub mod url_record;

pub use click::{ClickContext, ClickEvent};
pub use log_entry::{LogEntry, LogLevel, NewLogEntry};
pub use url_record::{NewUrlRecord, UrlRecord, UrlRecordPatch};
