//! Configuration module.
//!
//! Handles data source descriptors, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{ConnectionError, DataSourceConfig, ENV_CONNECTION_NAME};
pub use settings::{
    expand_env_vars, ConnectionSettings, LogFormat, LoggingSettings, Settings, SettingsError,
    WorkerSettings, CONFIG_ENV_VAR, LOCAL_CONFIG_FILE,
};
