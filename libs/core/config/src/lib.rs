pub mod server;
pub mod tracing;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::de::DeserializeOwned;
use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Settings(#[from] figment::Error),
}

/// Application environment (dev = local/kind, prod = full k8s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local dev or kind cluster
    Production,  // Full k8s cluster
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version of the running binary, reported by `/health`.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load layered settings: a TOML file, then environment variables on top.
///
/// The file path is read from `{prefix}SETTINGS` and falls back to
/// `default_path`. A missing file is not an error; every value can come from
/// the environment instead. Environment keys are `{prefix}` followed by the
/// field path with `__` between nesting levels:
///
/// ```text
/// CATALOG_SETTINGS=/etc/catalog/settings.toml
/// CATALOG_DB__HOST=db.internal
/// CATALOG_APP__PORT=9000
/// ```
///
/// # Example
/// ```ignore
/// #[derive(serde::Deserialize)]
/// struct Settings { app: ServerConfig }
///
/// let settings: Settings = core_config::load_settings("CATALOG_", "settings.toml")?;
/// ```
pub fn load_settings<T: DeserializeOwned>(prefix: &str, default_path: &str) -> Result<T, ConfigError> {
    let path = env_or_default(&format!("{prefix}SETTINGS"), default_path);

    let settings = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(prefix).split("__"))
        .extract()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestSettings {
        db: TestDb,
    }

    #[derive(Debug, Deserialize)]
    struct TestDb {
        host: String,
        port: u16,
    }

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            let env = Environment::from_env();
            assert!(env.is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("MISSING_VAR", || {
            let result = env_or_default("MISSING_VAR", "default_value");
            assert_eq!(result, "default_value");
        });
    }

    #[test]
    fn test_load_settings_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                [db]
                host = "localhost"
                port = 5432
                "#,
            )?;

            let settings: TestSettings =
                load_settings("CFGTEST_", "settings.toml").expect("settings should load");
            assert_eq!(settings.db.host, "localhost");
            assert_eq!(settings.db.port, 5432);
            Ok(())
        });
    }

    #[test]
    fn test_load_settings_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                [db]
                host = "localhost"
                port = 5432
                "#,
            )?;
            jail.set_env("CFGENV_DB__HOST", "db.internal");

            let settings: TestSettings =
                load_settings("CFGENV_", "settings.toml").expect("settings should load");
            assert_eq!(settings.db.host, "db.internal");
            assert_eq!(settings.db.port, 5432);
            Ok(())
        });
    }

    #[test]
    fn test_load_settings_custom_path() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("other.toml", "[db]\nhost = \"other\"\nport = 6543\n")?;
            jail.set_env("CFGPATH_SETTINGS", "other.toml");

            let settings: TestSettings =
                load_settings("CFGPATH_", "settings.toml").expect("settings should load");
            assert_eq!(settings.db.host, "other");
            assert_eq!(settings.db.port, 6543);
            Ok(())
        });
    }

    #[test]
    fn test_load_settings_missing_field() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.toml", "[db]\nhost = \"localhost\"\n")?;

            let result: Result<TestSettings, _> = load_settings("CFGMISS_", "settings.toml");
            let err = result.expect_err("port is required");
            assert!(err.to_string().contains("port"));
            Ok(())
        });
    }
}
