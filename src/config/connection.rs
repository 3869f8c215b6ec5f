//! Data source connection descriptor.
//!
//! Supports configuration via environment variables:
//! - `CATALOG_INSPECTOR_URL`: Oracle connect descriptor or URL
//! - `CATALOG_INSPECTOR_USERNAME`: Username (optional)
//! - `CATALOG_INSPECTOR_PASSWORD`: Password (optional)

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name given to a data source built from the environment.
pub const ENV_CONNECTION_NAME: &str = "env";

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Connection parameters for one target database.
///
/// A plain carrier: the fields are handed to the worker as-is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub connection_name: String,
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl DataSourceConfig {
    pub fn new(
        connection_name: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            connection_name: connection_name.into(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `CATALOG_INSPECTOR_URL` is required; username and password default
    /// to empty (external authentication).
    pub fn from_env() -> Result<Self, ConnectionError> {
        let url = env::var("CATALOG_INSPECTOR_URL")
            .map_err(|_| ConnectionError::MissingEnvVar("CATALOG_INSPECTOR_URL".to_string()))?;
        let username = env::var("CATALOG_INSPECTOR_USERNAME").unwrap_or_default();
        let password = env::var("CATALOG_INSPECTOR_PASSWORD").unwrap_or_default();

        let config = Self::new(ENV_CONNECTION_NAME, url, username, password);
        config.validate()?;
        Ok(config)
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.url.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig(format!(
                "connection '{}' has an empty url",
                self.connection_name
            )));
        }
        Ok(())
    }
}

fn redacted(password: &str) -> &'static str {
    if password.is_empty() {
        ""
    } else {
        "***"
    }
}

impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("connection_name", &self.connection_name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl fmt::Display for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.username.is_empty() {
            write!(f, "{} ({})", self.connection_name, self.url)
        } else {
            write!(f, "{} ({}@{})", self.connection_name, self.username, self.url)
        }
    }
}
