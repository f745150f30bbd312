use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pii_config::DatabaseConfig;

#[derive(Parser)]
#[command(name = "filtered-logger")]
#[command(about = "Log user records with personal data redacted", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stream the users table through the redacting logger
    Users(DatabaseArgs),

    /// Redact a single message, or each line of stdin
    Redact {
        /// Message to redact; reads stdin when omitted
        message: Option<String>,

        /// Field to redact (repeatable; default from config)
        #[arg(long = "field", short = 'f')]
        fields: Vec<String>,

        /// Character between field=value pairs
        #[arg(long, default_value_t = pii_redact::SEPARATOR)]
        separator: char,

        /// Replacement for redacted values
        #[arg(long, default_value = pii_redact::REDACTION)]
        token: String,
    },
}

/// Connection overrides; each falls back to its environment variable, then the config file
#[derive(Args, Debug, Default)]
pub struct DatabaseArgs {
    #[arg(long, env = "PERSONAL_DATA_DB_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PERSONAL_DATA_DB_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "PERSONAL_DATA_DB_NAME")]
    pub database: Option<String>,

    #[arg(long, env = "PERSONAL_DATA_DB_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "PERSONAL_DATA_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Full connection URL (mysql://, mariadb:// or sqlite:)
    #[arg(long, env = "PERSONAL_DATA_DB_URL", hide_env_values = true)]
    pub url: Option<String>,
}

impl DatabaseArgs {
    /// Overlay the given values on top of `config`
    pub fn apply(self, mut config: DatabaseConfig) -> DatabaseConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.database.is_some() {
            config.database = self.database;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if self.url.is_some() {
            config.url = self.url;
        }
        config
    }
}
