//! Protocol types for worker communication.
//!
//! One JSON object per line in each direction. Requests carry a unique
//! `id` that the worker echoes back on the matching response.

use serde::{Deserialize, Serialize};

use crate::catalog::{parse_decimal, CatalogResult, Row, SqlValue};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "query.fetch_rows").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error information in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// ============================================================================
// Connection Parameters (included in all requests)
// ============================================================================

/// Database connection parameters.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Database driver name; always "oracle" for this crate.
    pub driver: String,
    /// Driver-specific connection string or URL.
    pub connection_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("driver", &self.driver)
            .field("connection_string", &self.connection_string)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Parameters for `query.fetch_rows`.
#[derive(Debug, Clone, Serialize)]
pub struct FetchRowsParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// SQL statement with positional `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub args: Vec<String>,
}

// ============================================================================
// Query Response Types
// ============================================================================

/// Column description in a result set.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResultColumn {
    /// Column name.
    pub name: String,
    /// Driver-reported type name.
    #[serde(rename = "type", default)]
    pub data_type: String,
}

/// Response from `query.fetch_rows`.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRowsResponse {
    /// Result column descriptions.
    #[serde(default)]
    pub columns: Vec<QueryResultColumn>,
    /// Result data rows.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl FetchRowsResponse {
    /// Convert the JSON rows into [`Row`]s.
    pub fn into_rows(self) -> CatalogResult<Vec<Row>> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().map(json_to_sql_value).collect())
            .collect()
    }
}

/// Convert one JSON cell into a [`SqlValue`].
///
/// Numbers are parsed from the literal text the worker wrote (serde_json's
/// `arbitrary_precision`), so no digit goes through `f64`. Workers may also
/// send NUMBER values as strings; those stay text and are converted on
/// demand.
pub fn json_to_sql_value(value: serde_json::Value) -> CatalogResult<SqlValue> {
    match value {
        serde_json::Value::Null => Ok(SqlValue::Null),
        serde_json::Value::String(s) => Ok(SqlValue::Text(s)),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()).map(SqlValue::Decimal),
        serde_json::Value::Bool(b) => Ok(SqlValue::Text(b.to_string())),
        other => Ok(SqlValue::Text(other.to_string())),
    }
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const FETCH_ROWS: &str = "query.fetch_rows";
}
