//! Database operations

use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use pii_config::DatabaseConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::{Result, StoreError, UserRow};

/// Columns are listed explicitly so rows always arrive in `UserRow` order.
pub const USERS_QUERY: &str =
    "SELECT name, email, phone, ssn, password, ip, last_login, user_agent FROM users";

/// Connection to the database holding the `users` table
#[derive(Debug, Clone)]
pub enum UserStore {
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

impl UserStore {
    /// Connect using explicit connection parameters
    ///
    /// `config.url` wins when set; otherwise a MySQL connection is built from
    /// the host, port, credentials and database name.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if let Some(url) = &config.url {
            return Self::connect_url(url).await;
        }

        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password);
        if let Some(database) = &config.database {
            options = options.database(database);
        }

        tracing::debug!(host = %config.host, port = config.port, "connecting to mysql");
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self::MySql(pool))
    }

    /// Connect from a `mysql://`, `mariadb://` or `sqlite:` URL
    pub async fn connect_url(url: &str) -> Result<Self> {
        if url.starts_with("sqlite:") {
            tracing::debug!("connecting to sqlite");
            // A single long-lived connection keeps `sqlite::memory:` databases alive.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(url)
                .await?;
            return Ok(Self::Sqlite(pool));
        }

        if url.starts_with("mysql:") || url.starts_with("mariadb:") {
            tracing::debug!("connecting to mysql");
            let pool = MySqlPoolOptions::new().max_connections(1).connect(url).await?;
            return Ok(Self::MySql(pool));
        }

        let scheme = url.split(':').next().unwrap_or_default();
        Err(StoreError::UnsupportedUrl(format!("{scheme}:")))
    }

    /// Stream every row of the `users` table
    pub fn users(&self) -> BoxStream<'_, Result<UserRow>> {
        match self {
            Self::MySql(pool) => sqlx::query_as::<_, UserRow>(USERS_QUERY)
                .fetch(pool)
                .map_err(StoreError::from)
                .boxed(),
            Self::Sqlite(pool) => sqlx::query_as::<_, UserRow>(USERS_QUERY)
                .fetch(pool)
                .map_err(StoreError::from)
                .boxed(),
        }
    }

    pub async fn close(&self) {
        match self {
            Self::MySql(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}
