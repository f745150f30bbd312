//! Log records handed to the formatter

use time::OffsetDateTime;
use tracing::Level;

/// A single log call: who logged it, how severe, when, and what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub name: String,
    pub level: Level,
    pub timestamp: OffsetDateTime,
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current UTC time
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            timestamp: OffsetDateTime::now_utc(),
            message: message.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}
