use serde::Deserialize;
use std::net::Ipv4Addr;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin (development).
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            cors_allowed_origins: Vec::new(),
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    /// Listens on all interfaces, port 8000.
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8000,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_settings;

    #[derive(Debug, Deserialize)]
    struct Settings {
        #[serde(default)]
        app: ServerConfig,
    }

    #[test]
    fn test_server_config_defaults_when_section_missing() {
        figment::Jail::expect_with(|_jail| {
            let settings: Settings = load_settings("SRVDEF_", "settings.toml").unwrap();
            assert_eq!(settings.app.host, "0.0.0.0");
            assert_eq!(settings.app.port, 8000);
            assert_eq!(settings.app.address(), "0.0.0.0:8000");
            Ok(())
        });
    }

    #[test]
    fn test_server_config_partial_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.toml", "[app]\nport = 9000\n")?;

            let settings: Settings = load_settings("SRVPART_", "settings.toml").unwrap();
            assert_eq!(settings.app.host, "0.0.0.0");
            assert_eq!(settings.app.port, 9000);
            Ok(())
        });
    }

    #[test]
    fn test_server_config_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SRVENV_APP__HOST", "127.0.0.1");
            jail.set_env("SRVENV_APP__PORT", "3000");

            let settings: Settings = load_settings("SRVENV_", "settings.toml").unwrap();
            assert_eq!(settings.app.address(), "127.0.0.1:3000");
            Ok(())
        });
    }

    #[test]
    fn test_server_config_cors_origins_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                "[app]\ncors_allowed_origins = [\"http://localhost:3000\"]\n",
            )?;

            let settings: Settings = load_settings("SRVCORS_", "settings.toml").unwrap();
            assert_eq!(settings.app.cors_allowed_origins, vec!["http://localhost:3000"]);
            Ok(())
        });
    }

    #[test]
    fn test_server_config_port_out_of_range() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SRVBAD_APP__PORT", "99999");

            let result: Result<Settings, _> = load_settings("SRVBAD_", "settings.toml");
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_server_config_new() {
        let config = ServerConfig::new("192.168.1.1".to_string(), 5000);
        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.address(), "192.168.1.1:5000");
    }
}
