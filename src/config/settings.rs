//! TOML-based configuration.
//!
//! Supports a config file (catalog-inspector.toml) with environment
//! variable expansion in connection fields.
//!
//! Example configuration:
//! ```toml
//! [connections.production]
//! url = "prod-db.example.com:1521/ORCLPDB1"
//! username = "reporting"
//! password = "${PROD_DB_PASSWORD}"
//!
//! [connections.dev]
//! url = "localhost:1521/XEPDB1"
//! username = "scott"
//! password = "tiger"
//!
//! [worker]
//! path = "/usr/local/bin/oracle-worker"
//! timeout_secs = 60
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::DataSourceConfig;
use crate::worker::DEFAULT_TIMEOUT_SECS;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CATALOG_INSPECTOR_CONFIG";

/// File name searched in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "catalog-inspector.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Named database connections.
    pub connections: BTreeMap<String, ConnectionSettings>,

    /// Worker configuration.
    pub worker: WorkerSettings,

    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// One `[connections.<name>]` table.
#[derive(Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Connect descriptor or URL (supports ${ENV_VAR} expansion).
    pub url: String,

    /// Username (supports ${ENV_VAR} expansion).
    #[serde(default)]
    pub username: String,

    /// Password (supports ${ENV_VAR} expansion).
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl ConnectionSettings {
    /// Resolve into a [`DataSourceConfig`], expanding environment variables.
    pub fn to_data_source(&self, name: &str) -> Result<DataSourceConfig, SettingsError> {
        let config = DataSourceConfig::new(
            name,
            expand_env_vars(&self.url)?,
            expand_env_vars(&self.username)?,
            expand_env_vars(&self.password)?,
        );
        config
            .validate()
            .map_err(|e| SettingsError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the worker binary (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter when `RUST_LOG` is unset.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `CATALOG_INSPECTOR_CONFIG`
    /// 2. `./catalog-inspector.toml`
    /// 3. `<config dir>/catalog-inspector/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("catalog-inspector").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if defined, else the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a data source by name, or the default one when `name` is `None`.
    ///
    /// Falls back to the `CATALOG_INSPECTOR_*` environment variables when no
    /// connection is configured at all.
    pub fn data_source(&self, name: Option<&str>) -> Result<DataSourceConfig, SettingsError> {
        match name {
            Some(name) => self.get_connection(name)?.to_data_source(name),
            None => match self.default_connection() {
                Some((name, conn)) => conn.to_data_source(name),
                None => DataSourceConfig::from_env()
                    .map_err(|e| SettingsError::InvalidConfig(e.to_string())),
            },
        }
    }

    /// Get the configured worker binary path, if any.
    ///
    /// Fails when the path references an unset environment variable.
    pub fn worker_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.worker
            .path
            .as_deref()
            .map(|path| expand_env_vars(path).map(PathBuf::from))
            .transpose()
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&ch) = chars.peek() {
            if braced {
                chars.next();
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            } else if ch.is_alphanumeric() || ch == '_' {
                var_name.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if var_name.is_empty() && !braced {
            // A lone $ is kept as-is.
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
