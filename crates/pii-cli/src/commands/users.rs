use anyhow::{Context, Result};
use pii_config::Config;
use pii_log::Logger;
use pii_store::{UserStore, log_users};

use crate::cli::DatabaseArgs;
use crate::commands::logger_config;

pub async fn handle(args: DatabaseArgs, config: &Config) -> Result<()> {
    let database = args.apply(config.database.clone());
    let logger = Logger::stderr(logger_config(&config.logging)?)?;

    let store = UserStore::connect(&database)
        .await
        .context("failed to connect to the users database")?;

    let result = log_users(&store, &logger).await;
    store.close().await;

    let count = result.context("failed to log users")?;
    tracing::info!(rows = count, "finished");

    Ok(())
}
