//! Activity log: structured `tracing` events mirrored into the persisted
//! log collection.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::clock::Clock;
use crate::domain::entities::{LogEntry, LogLevel, NewLogEntry};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;

/// Records user-visible activity.
///
/// Every call emits a `tracing` event and appends an entry to the log
/// repository. Persistence failures are reported through `tracing` and
/// never surface to the caller.
pub struct ActivityLog<L: LogRepository> {
    repository: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L: LogRepository> ActivityLog<L> {
    pub fn new(repository: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn log(&self, level: LogLevel, message: &str, data: Value) {
        match level {
            LogLevel::Error => tracing::error!(data = %data, "{}", message),
            LogLevel::Warn => tracing::warn!(data = %data, "{}", message),
            LogLevel::Info => tracing::info!(data = %data, "{}", message),
            LogLevel::Debug => tracing::debug!(data = %data, "{}", message),
        }

        let entry = NewLogEntry {
            timestamp: self.clock.now(),
            level,
            message: message.to_string(),
            data,
        };

        if let Err(e) = self.repository.append(entry) {
            tracing::error!(error = %e, "Error saving log");
        }
    }

    pub fn error(&self, message: &str, data: Value) {
        self.log(LogLevel::Error, message, data);
    }

    pub fn warn(&self, message: &str, data: Value) {
        self.log(LogLevel::Warn, message, data);
    }

    pub fn info(&self, message: &str, data: Value) {
        self.log(LogLevel::Info, message, data);
    }

    pub fn debug(&self, message: &str, data: Value) {
        self.log(LogLevel::Debug, message, data);
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> Result<Vec<LogEntry>, AppError> {
        self.repository.list()
    }

    /// The latest `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>, AppError> {
        let entries = self.repository.list()?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.repository.clear()
    }
}
