//! Row sources and the redacting dump loop

use std::io::Write;

use futures_util::stream::{self, BoxStream};
use futures_util::{StreamExt, TryStreamExt};
use pii_log::Logger;

use crate::{Result, UserRow, UserStore};

/// Anything that can yield `users` rows in order
pub trait RowSource {
    fn users(&self) -> BoxStream<'_, Result<UserRow>>;
}

impl RowSource for UserStore {
    fn users(&self) -> BoxStream<'_, Result<UserRow>> {
        UserStore::users(self)
    }
}

impl RowSource for Vec<UserRow> {
    fn users(&self) -> BoxStream<'_, Result<UserRow>> {
        stream::iter(self.iter().cloned().map(Ok)).boxed()
    }
}

/// Log every row from `source` at INFO through `logger`
///
/// Returns the number of rows read. The first source or sink error stops the
/// run and is returned as is.
pub async fn log_users<S, W>(source: &S, logger: &Logger<W>) -> Result<usize>
where
    S: RowSource + ?Sized,
    W: Write,
{
    let mut rows = source.users();
    let mut count = 0;

    while let Some(row) = rows.try_next().await? {
        logger.info(row.to_string())?;
        count += 1;
    }

    tracing::debug!(rows = count, logger = logger.name(), "logged users");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pii_log::LoggerConfig;

    fn row(name: &str, ip: &str) -> UserRow {
        UserRow {
            name: Some(name.to_string()),
            email: Some(format!("{}@x.com", name.to_lowercase())),
            ip: Some(ip.to_string()),
            ..UserRow::default()
        }
    }

    #[tokio::test]
    async fn test_logs_each_row_redacted() {
        let rows = vec![row("Jane", "10.0.0.1"), row("John", "10.0.0.2")];
        let logger = Logger::new(LoggerConfig::default(), Vec::new()).unwrap();

        let count = log_users(&rows, &logger).await.unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(logger.into_sink()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("name=***; email=***;"));
        assert!(lines[0].contains("ip=10.0.0.1;"));
        assert!(lines[1].contains("ip=10.0.0.2;"));
        assert!(!output.contains("Jane") && !output.contains("john@x.com"));
    }

    #[tokio::test]
    async fn test_empty_source() {
        let rows: Vec<UserRow> = Vec::new();
        let logger = Logger::new(LoggerConfig::default(), Vec::new()).unwrap();

        assert_eq!(log_users(&rows, &logger).await.unwrap(), 0);
        assert!(logger.into_sink().is_empty());
    }
}
