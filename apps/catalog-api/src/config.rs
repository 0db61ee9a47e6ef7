use core_config::{AppInfo, app_info, load_settings, server::ServerConfig};
use database::postgres::PostgresConfig;
use serde::Deserialize;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Env prefix; `CATALOG_DB__HOST=db` overrides `[db] host`
pub const ENV_PREFIX: &str = "CATALOG_";

const DEFAULT_SETTINGS_PATH: &str = "settings.toml";

/// Settings file sections
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: ServerConfig,
    pub db: PostgresConfig,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub environment: Environment,
}

impl Config {
    /// Read `settings.toml` (or `CATALOG_SETTINGS`) merged with `CATALOG_*` env vars
    pub fn load() -> eyre::Result<Self> {
        let settings: Settings = load_settings(ENV_PREFIX, DEFAULT_SETTINGS_PATH)?;

        Ok(Self {
            app: app_info!(),
            server: settings.app,
            database: settings.db,
            environment: Environment::from_env(),
        })
    }
}
