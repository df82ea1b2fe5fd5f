//! Activity log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity of a persisted log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted activity log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl LogEntry {
    pub fn new(id: u64, new_entry: NewLogEntry) -> Self {
        Self {
            id,
            timestamp: new_entry.timestamp,
            level: new_entry.level,
            message: new_entry.message,
            data: new_entry.data,
        }
    }
}

/// Input data for appending a log entry. The id is assigned on append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(serde_json::to_value(LogLevel::Warn).unwrap(), "warn");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_log_entry_from_new() {
        let now = Utc::now();
        let entry = LogEntry::new(
            7,
            NewLogEntry {
                timestamp: now,
                level: LogLevel::Info,
                message: "URL deleted".to_string(),
                data: json!({ "shortcode": "abc" }),
            },
        );

        assert_eq!(entry.id, 7);
        assert_eq!(entry.timestamp, now);
        assert_eq!(entry.data["shortcode"], "abc");
    }
}
