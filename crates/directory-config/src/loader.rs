//! Configuration loader with layered sources.

use crate::{AppConfig, StoreBackend};
use config::{Config, ConfigError, Environment, File};
use directory_core::DirectoryError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides, e.g. `DIRECTORY_SERVER__PORT`.
pub const ENV_PREFIX: &str = "DIRECTORY";

/// Configuration loaded once at startup from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `DIRECTORY_` prefix
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, DirectoryError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, DirectoryError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, DirectoryError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{}_ENVIRONMENT", ENV_PREFIX))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_directory_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_directory_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration, failing fast on values that would only
    /// break at request time.
    pub fn validate_config(config: &AppConfig) -> Result<(), DirectoryError> {
        if config.database.backend == StoreBackend::Mysql && config.database.url.is_empty() {
            return Err(invalid("Database URL is required"));
        }

        if !is_valid_identifier(&config.database.table) {
            return Err(invalid(format!(
                "Invalid table name '{}': use letters, digits and underscores",
                config.database.table
            )));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(invalid(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                config.database.min_connections, config.database.max_connections
            )));
        }

        if config.server.port == 0 {
            return Err(invalid("server.port must be non-zero"));
        }

        if config.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs must be positive"));
        }

        if config.cache.ttl_secs == 0 {
            return Err(invalid("cache.ttl_secs must be positive"));
        }

        Ok(())
    }

}

/// Checks that `name` can be spliced into SQL as a table identifier.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 64 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(message: impl Into<String>) -> DirectoryError {
    DirectoryError::Configuration(message.into())
}

fn config_error_to_directory_error(err: ConfigError) -> DirectoryError {
    DirectoryError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBackend;
    use std::fs;

    fn write_config(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(format!("{}.toml", name)), contents).unwrap();
    }

    #[test]
    fn test_loads_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.into_config();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.table, "users");
    }

    #[test]
    fn test_loads_default_toml() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "default",
            r#"
            [server]
            port = 9000

            [database]
            table = "directory_users"

            [cache]
            backend = "memory"
            ttl_secs = 60
            "#,
        );

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.into_config();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.table, "directory_users");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl_secs, 60);
        // untouched fields keep their defaults
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "default", "[server]\nport = 9000\n");
        write_config(dir.path(), "local", "[server]\nport = 9100\n");

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        assert_eq!(loader.into_config().server.port, 9100);
    }

    #[test]
    fn test_rejects_invalid_table_name() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "default", "[database]\ntable = \"users; DROP TABLE x\"\n");

        let result = ConfigLoader::new(dir.path().to_string_lossy());
        assert!(matches!(result, Err(DirectoryError::Configuration(_))));
    }

    #[test]
    fn test_validate_config_rules() {
        let mut config = AppConfig::default();
        assert!(ConfigLoader::validate_config(&config).is_ok());

        config.database.min_connections = 20;
        config.database.max_connections = 5;
        assert!(ConfigLoader::validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;
        assert!(ConfigLoader::validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.database.url.clear();
        assert!(ConfigLoader::validate_config(&config).is_err());
        config.database.backend = StoreBackend::Memory;
        assert!(ConfigLoader::validate_config(&config).is_ok());
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("users"));
        assert!(is_valid_identifier("_users_v2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2users"));
        assert!(!is_valid_identifier("users-table"));
        assert!(!is_valid_identifier("users`"));
    }
}
