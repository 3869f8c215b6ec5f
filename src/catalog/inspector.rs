//! Catalog inspector trait and its Oracle implementation.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use tracing::{debug, info, warn};

use super::error::CatalogResult;
use super::executor::{PrimaryKeyRowMapper, QueryExecutor, QueryExecutorExt};
use super::identifier::validate_identifier;
use super::queries;
use super::types::{is_numeric_type, Column, PrimaryKey, TableInformation};

/// Read-only view over a database catalog.
///
/// # Example
///
/// ```ignore
/// use catalog_inspector::catalog::{CatalogInspector, OracleCatalogInspector};
///
/// async fn example(inspector: &impl CatalogInspector) -> CatalogResult<()> {
///     let tables = inspector.get_tables().await?;
///     let info = inspector.get_table_information(&tables[0]).await?;
///     println!("{} columns", info.column_count());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CatalogInspector: Send + Sync {
    /// All schema names, in catalog order.
    async fn get_schemas(&self) -> CatalogResult<Vec<String>>;

    /// Tables visible to the connected user, in catalog order.
    async fn get_tables(&self) -> CatalogResult<Vec<String>>;

    /// Column names of `table_name`, in catalog order.
    async fn get_columns(&self, table_name: &str) -> CatalogResult<Vec<String>>;

    /// Constraints, columns, values, and numeric statistics of `table_name`.
    async fn get_table_information(&self, table_name: &str) -> CatalogResult<TableInformation>;
}

/// [`CatalogInspector`] over Oracle's catalog views.
///
/// Stateless apart from the executor, so concurrent use is as safe as the
/// executor is.
pub struct OracleCatalogInspector<E> {
    executor: E,
}

impl<E: QueryExecutor> OracleCatalogInspector<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch the declared type and every value of one column.
    async fn fetch_column(&self, table_name: &str, column_name: &str) -> CatalogResult<Column> {
        let data_type: String = self
            .executor
            .query_for_object(queries::GET_COLUMN_DATA_TYPE, &[table_name, column_name])
            .await?;

        let sql = queries::select_column_values(table_name, column_name)?;

        if is_numeric_type(&data_type) {
            let values: Vec<Option<BigDecimal>> =
                self.executor.query_for_list(&sql, &[]).await?;
            debug!(
                "Column {}.{} ({}): {} numeric values",
                table_name,
                column_name,
                data_type,
                values.len()
            );
            let column = Column::numeric(column_name, data_type, values);
            if column.stats().is_none() {
                warn!(
                    "Column {}.{} has no non-NULL values; statistics omitted",
                    table_name, column_name
                );
            }
            Ok(column)
        } else {
            let values: Vec<Option<String>> = self.executor.query_for_list(&sql, &[]).await?;
            debug!(
                "Column {}.{} ({}): {} text values",
                table_name,
                column_name,
                data_type,
                values.len()
            );
            Ok(Column::text(column_name, data_type, values))
        }
    }
}

#[async_trait]
impl<E: QueryExecutor> CatalogInspector for OracleCatalogInspector<E> {
    async fn get_schemas(&self) -> CatalogResult<Vec<String>> {
        info!("Get schemas started");
        self.executor.query_for_list(queries::GET_SCHEMAS, &[]).await
    }

    async fn get_tables(&self) -> CatalogResult<Vec<String>> {
        info!("Get tables started");
        self.executor.query_for_list(queries::GET_TABLES, &[]).await
    }

    async fn get_columns(&self, table_name: &str) -> CatalogResult<Vec<String>> {
        info!("Get columns started for {}", table_name);
        validate_identifier(table_name)?;
        self.executor
            .query_for_list(queries::GET_COLUMNS, &[table_name])
            .await
    }

    /// Issues `2 + 2N` queries for a table with `N` columns, one after the
    /// other, and pulls every row of every column. Expect this to be slow
    /// on wide or large tables.
    ///
    /// The first failing query aborts the whole call.
    async fn get_table_information(&self, table_name: &str) -> CatalogResult<TableInformation> {
        info!("Get table information started for {}", table_name);
        validate_identifier(table_name)?;

        let primary_keys: Vec<PrimaryKey> = self
            .executor
            .query(queries::GET_PRIMARY_KEYS, &PrimaryKeyRowMapper, &[table_name])
            .await?;

        let column_names = self.get_columns(table_name).await?;

        let mut columns = Vec::with_capacity(column_names.len());
        for column_name in &column_names {
            columns.push(self.fetch_column(table_name, column_name).await?);
        }

        info!(
            "Profiled {} columns and {} constraints for {}",
            columns.len(),
            primary_keys.len(),
            table_name
        );

        Ok(TableInformation::new(columns, primary_keys))
    }
}
