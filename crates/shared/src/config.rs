//! Application configuration management.
//!
//! Configuration layers, later sources winning:
//! `config/default.toml`, then `config/{RUN_MODE}.toml`, then
//! `CLUBDESK__`-prefixed environment variables
//! (e.g. `CLUBDESK__DATABASE__URL`).

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session token configuration.
    pub jwt: JwtSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "DatabaseConfig::default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        10
    }

    fn default_min_connections() -> u32 {
        1
    }
}

/// Session token configuration.
///
/// Tokens are issued by the external authentication provider; this
/// service only validates them, so the settings are the shared secret
/// and the expiry used when minting development tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key shared with the authentication provider.
    pub secret: String,
    /// Token expiration in seconds (development token minting only).
    #[serde(default = "JwtSettings::default_token_expiry")]
    pub token_expiry_secs: u64,
}

impl JwtSettings {
    fn default_token_expiry() -> u64 {
        3600 // 1 hour
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to parse or a required value
    /// (database url, jwt secret) is missing from every source.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLUBDESK").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_minimal_config_deserializes() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "database": { "url": "postgres://localhost/clubdesk" },
                "jwt": { "secret": "s3cret" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.jwt.token_expiry_secs, 3600);
    }
}
