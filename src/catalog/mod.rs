//! Oracle catalog inspection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    OracleCatalogInspector                       │
//! │  - get_schemas()            SYS.DBA_USERS                       │
//! │  - get_tables()             ALL_TABLES                          │
//! │  - get_columns(table)       USER_TAB_COLS                       │
//! │  - get_table_information()  ALL_CONSTRAINTS + USER_TAB_COLS     │
//! │                             + one value query per column        │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              QueryExecutor (fetch_rows + typed helpers)         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use catalog_inspector::catalog::{CatalogInspector, OracleCatalogInspector};
//! use catalog_inspector::worker::{WorkerClient, WorkerQueryExecutor};
//!
//! let client = WorkerClient::spawn("./oracle-worker").await?;
//! let executor = WorkerQueryExecutor::with_client(client, &config);
//! let inspector = OracleCatalogInspector::new(executor);
//!
//! let info = inspector.get_table_information("ORDERS").await?;
//! for column in info.columns() {
//!     println!("{} {:?}", column.name(), column.median());
//! }
//! ```

mod error;
mod executor;
pub mod identifier;
mod inspector;
pub mod queries;
mod stats;
mod types;

pub use error::{BoxError, CatalogError, CatalogResult};
pub use executor::{
    column_at, FromSqlValue, PrimaryKeyRowMapper, QueryExecutor, QueryExecutorExt, Row,
    RowMapper, SqlValue,
};
pub(crate) use executor::parse_decimal;
pub use inspector::{CatalogInspector, OracleCatalogInspector};
pub use stats::median;
pub use types::{
    is_numeric_type, Column, ColumnData, ColumnStats, PrimaryKey, TableInformation,
    CONSTRAINT_TYPE_PRIMARY_KEY,
};
