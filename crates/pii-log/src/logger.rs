//! Explicit logger handle
//!
//! Built once at startup and passed by reference to whatever needs to log.
//! There is no global registry: two loggers with the same name are simply
//! two independent values.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use pii_redact::PII_FIELDS;
use tracing::Level;

use crate::{LogRecord, RedactingFormatter, Result};

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub name: String,
    /// Most verbose level that is still emitted
    pub level: Level,
    pub fields: Vec<String>,
    /// Base template; `None` uses [`crate::DEFAULT_FORMAT`]
    pub format: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "user_data".to_string(),
            level: Level::INFO,
            fields: PII_FIELDS.iter().map(|f| f.to_string()).collect(),
            format: None,
        }
    }
}

/// Named logger writing redacted lines to a sink
pub struct Logger<W: Write> {
    name: String,
    level: Level,
    formatter: RedactingFormatter,
    sink: Mutex<W>,
}

impl<W: Write> Logger<W> {
    pub fn new(config: LoggerConfig, sink: W) -> Result<Self> {
        let formatter = match &config.format {
            Some(format) => RedactingFormatter::with_template(config.fields, format)?,
            None => RedactingFormatter::new(config.fields),
        };

        Ok(Self {
            name: config.name,
            level: config.level,
            formatter,
            sink: Mutex::new(sink),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Format, redact and write one line
    pub fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let record = LogRecord::new(self.name.as_str(), level, message);
        let line = self.formatter.format(&record)?;

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "{line}")?;
        sink.flush()?;
        Ok(())
    }

    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::ERROR, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::WARN, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::INFO, message)
    }

    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::DEBUG, message)
    }

    /// Consume the logger and hand back its sink
    pub fn into_sink(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger<io::Stderr> {
    /// Logger writing to standard error
    pub fn stderr(config: LoggerConfig) -> Result<Self> {
        Self::new(config, io::stderr())
    }
}
