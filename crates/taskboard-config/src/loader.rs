//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskboard_core::TaskboardError;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "TASKBOARD_ENVIRONMENT";

/// Prefix of environment variable overrides, e.g. `TASKBOARD__DATABASE__URL`.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with the `TASKBOARD__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, TaskboardError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TaskboardError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), TaskboardError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, TaskboardError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();
        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_taskboard_error)?;

        validate_config(&app_config)?;
        Ok(app_config)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), TaskboardError> {
    if config.database.url.is_empty() {
        return Err(TaskboardError::Configuration(
            "Database URL is required".to_string(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(TaskboardError::Configuration(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }
    if config.database.min_connections > config.database.max_connections {
        return Err(TaskboardError::Configuration(
            "database.min_connections must not exceed database.max_connections".to_string(),
        ));
    }
    if !matches!(
        config.observability.log_format.to_ascii_lowercase().as_str(),
        "json" | "pretty"
    ) {
        return Err(TaskboardError::Configuration(format!(
            "Unsupported log format: {}",
            config.observability.log_format
        )));
    }
    Ok(())
}

fn config_error_to_taskboard_error(err: ConfigError) -> TaskboardError {
    TaskboardError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_loads_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [server]
            port = 9000

            [database]
            url = "postgres://u:p@db:5432/tasks"
            max_connections = 4
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "postgres://u:p@db:5432/tasks");
        assert_eq!(config.database.max_connections, 4);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[server]\nport = 9001\n").unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().await.server.port, 9001);

        fs::write(&path, "[server]\nport = 9002\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 9002);
    }

    #[test]
    fn test_missing_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent"));
        assert!(loader.is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(TaskboardError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = AppConfig::default();
        config.database.min_connections = 10;
        config.database.max_connections = 2;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.observability.log_format = "xml".to_string();
        assert!(validate_config(&config).is_err());

        config.observability.log_format = "JSON".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
