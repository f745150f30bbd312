//! Redacting log formatting
//!
//! This crate contains:
//! - Log records and the base line template
//! - `RedactingFormatter`, which redacts every rendered line
//! - `Logger`, an explicit named logger writing to any `io::Write`

pub mod error;
pub mod formatter;
pub mod logger;
pub mod record;
pub mod template;

pub use error::{LogError, Result};
pub use formatter::RedactingFormatter;
pub use logger::{Logger, LoggerConfig};
pub use record::LogRecord;
pub use template::{DEFAULT_FORMAT, Template};
