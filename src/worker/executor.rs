//! [`QueryExecutor`] backed by the worker process.

use std::sync::Arc;

use async_trait::async_trait;

use super::protocol::ConnectionParams;
use super::WorkerClient;
use crate::catalog::{CatalogResult, QueryExecutor, Row};
use crate::config::DataSourceConfig;

/// Driver name sent to the worker.
pub const ORACLE_DRIVER: &str = "oracle";

/// Forwards every statement to a [`WorkerClient`] for one data source.
///
/// The client is shared, so several executors (one per data source) can
/// use the same worker process.
pub struct WorkerQueryExecutor {
    client: Arc<WorkerClient>,
    connection: ConnectionParams,
}

impl WorkerQueryExecutor {
    pub fn new(client: Arc<WorkerClient>, config: &DataSourceConfig) -> Self {
        Self {
            client,
            connection: connection_params(config),
        }
    }

    /// Convenience constructor that wraps an owned client in an `Arc`.
    pub fn with_client(client: WorkerClient, config: &DataSourceConfig) -> Self {
        Self::new(Arc::new(client), config)
    }

    pub fn client(&self) -> &WorkerClient {
        &self.client
    }
}

/// Worker connection parameters for a data source.
pub fn connection_params(config: &DataSourceConfig) -> ConnectionParams {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    ConnectionParams {
        driver: ORACLE_DRIVER.to_string(),
        connection_string: config.url.clone(),
        username: non_empty(&config.username),
        password: non_empty(&config.password),
    }
}

#[async_trait]
impl QueryExecutor for WorkerQueryExecutor {
    async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<Row>> {
        let args = params.iter().map(|p| p.to_string()).collect();
        let response = self
            .client
            .fetch_rows(self.connection.clone(), sql, args)
            .await?;
        response.into_rows()
    }
}
