//! # catalog-inspector
//!
//! Enumerates schemas, tables, and columns from Oracle catalog views and
//! profiles a table's columns, with exact min/max/median statistics for
//! numeric columns.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          CatalogInspector (catalog views + stats)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [QueryExecutor]
//! ┌─────────────────────────────────────────────────────────┐
//! │          WorkerQueryExecutor → WorkerClient              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [NDJSON over stdin/stdout]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Database worker process                     │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod worker;

pub use catalog::{
    CatalogError, CatalogInspector, CatalogResult, Column, ColumnData, ColumnStats,
    OracleCatalogInspector, PrimaryKey, QueryExecutor, TableInformation,
};
pub use config::{DataSourceConfig, Settings};
