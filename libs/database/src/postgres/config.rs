use sea_orm::ConnectOptions;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::common::RetryConfig;

/// PostgreSQL connection settings
///
/// Deserialized from the `[db]` settings section. Only `name`, `user` and
/// `password` are required; the rest fall back to the defaults below.
///
/// ```toml
/// [db]
/// name = "catalog"
/// user = "catalog"
/// password = "secret"
/// host = "localhost"
/// port = 5432
/// max_connections = 20
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct PostgresConfig {
    pub name: String,
    pub user: String,
    pub password: Secret<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connect and acquire timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Log every SQL statement through sqlx
    #[serde(default)]
    pub sqlx_logging: bool,

    /// Startup connection retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    8
}

impl PostgresConfig {
    /// Settings with default pool options for the given credentials
    pub fn new(
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            user: user.into(),
            password: Secret::new(password.into()),
            host: host.into(),
            port,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sqlx_logging: false,
            retry: RetryConfig::default(),
        }
    }

    /// Connection URL, password included. Do not log it.
    ///
    /// User, password and database name are percent-encoded.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(self.password.expose_secret()),
            self.host,
            self.port,
            urlencoding::encode(&self.name)
        )
    }

    /// Connection URL with the password masked, safe for logs
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            urlencoding::encode(&self.user),
            self.host,
            self.port,
            urlencoding::encode(&self.name)
        )
    }

    /// Replace the password, raw or encoded, in text bound for logs
    pub fn redact(&self, text: &str) -> String {
        let password = self.password.expose_secret();
        if password.is_empty() {
            return text.to_string();
        }

        text.replace(&self.url(), &self.redacted_url())
            .replace(&*urlencoding::encode(password), "***")
            .replace(password.as_str(), "***")
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn connect_options(&self) -> ConnectOptions {
        let timeout = Duration::from_secs(self.connect_timeout_secs);

        let mut opt = ConnectOptions::new(self.url());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}
