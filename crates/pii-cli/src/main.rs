mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pii_config::Config;
use pii_log::RedactingFormatter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go through the same redaction as user records
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .event_format(RedactingFormatter::default())
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Users(args) => commands::users::handle(args, &config).await,
        cli::Commands::Redact {
            message,
            fields,
            separator,
            token,
        } => commands::redact::handle(message, fields, separator, token, &config),
    }
}
