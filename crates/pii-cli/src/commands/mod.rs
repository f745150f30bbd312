pub mod redact;
pub mod users;

use anyhow::{Context, Result};
use pii_config::LoggingConfig;
use pii_log::LoggerConfig;

/// Turn the `[logging]` section into a logger configuration
pub fn logger_config(logging: &LoggingConfig) -> Result<LoggerConfig> {
    let level = logging
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", logging.level))?;

    Ok(LoggerConfig {
        name: logging.name.clone(),
        level,
        fields: logging.fields.clone(),
        format: logging.format.clone(),
    })
}
