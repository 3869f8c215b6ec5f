//! Query execution seam.
//!
//! The inspector never talks to a database driver directly. It issues
//! statements through a [`QueryExecutor`], which only has to return raw
//! rows. The typed helpers in [`QueryExecutorExt`] provide the scalar,
//! list, and row-mapping conveniences on top of that one primitive.

use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use super::error::{CatalogError, CatalogResult};
use super::types::PrimaryKey;

/// A single value returned by the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Decimal(BigDecimal),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<BigDecimal> for SqlValue {
    fn from(d: BigDecimal) -> Self {
        SqlValue::Decimal(d)
    }
}

/// One result row, in select-list order.
pub type Row = Vec<SqlValue>;

/// Executes statements with positional `?` parameters.
///
/// Implementations must be safe to share between callers; the inspector
/// holds no other state.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `sql`, binding `params` in order, and return every row.
    async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<Row>>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<Row>> {
        (**self).fetch_rows(sql, params).await
    }
}

/// Conversion from a [`SqlValue`] into a Rust type.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> CatalogResult<Self>;
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> CatalogResult<Self> {
        match value {
            SqlValue::Text(s) => Ok(s),
            SqlValue::Decimal(d) => Ok(d.to_string()),
            SqlValue::Null => Err(CatalogError::UnexpectedNull { target: "String" }),
        }
    }
}

impl FromSqlValue for BigDecimal {
    fn from_sql_value(value: SqlValue) -> CatalogResult<Self> {
        match value {
            SqlValue::Decimal(d) => Ok(d),
            SqlValue::Text(s) => parse_decimal(&s),
            SqlValue::Null => Err(CatalogError::UnexpectedNull { target: "Decimal" }),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue) -> CatalogResult<Self> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

/// Parse decimal text exactly, accepting scientific notation.
///
/// There is no digit limit, so every Oracle `NUMBER` fits.
pub(crate) fn parse_decimal(s: &str) -> CatalogResult<BigDecimal> {
    s.trim()
        .parse::<BigDecimal>()
        .map_err(|_| CatalogError::Conversion {
            value: s.to_string(),
            target: "Decimal",
        })
}

/// Maps one result row into a domain record.
pub trait RowMapper<T>: Send + Sync {
    fn map_row(&self, row: Row, row_num: usize) -> CatalogResult<T>;
}

/// Take the value at `index` out of a row.
pub fn column_at<T: FromSqlValue>(row: &mut Row, row_num: usize, index: usize) -> CatalogResult<T> {
    let value = row
        .get_mut(index)
        .map(|v| std::mem::replace(v, SqlValue::Null))
        .ok_or(CatalogError::MissingColumn {
            row: row_num,
            index,
        })?;
    T::from_sql_value(value)
}

/// Maps `(CONSTRAINT_NAME, CONSTRAINT_TYPE)` rows into [`PrimaryKey`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeyRowMapper;

impl RowMapper<PrimaryKey> for PrimaryKeyRowMapper {
    fn map_row(&self, mut row: Row, row_num: usize) -> CatalogResult<PrimaryKey> {
        let constraint_name: String = column_at(&mut row, row_num, 0)?;
        let constraint_type: String = column_at(&mut row, row_num, 1)?;
        Ok(PrimaryKey::new(constraint_name, constraint_type))
    }
}

/// Typed helpers over [`QueryExecutor::fetch_rows`].
#[async_trait]
pub trait QueryExecutorExt: QueryExecutor {
    /// First column of every row, converted to `T`.
    async fn query_for_list<T>(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<T>>
    where
        T: FromSqlValue + Send,
    {
        let rows = self.fetch_rows(sql, params).await?;
        rows.into_iter()
            .enumerate()
            .map(|(row_num, mut row)| column_at(&mut row, row_num, 0))
            .collect()
    }

    /// First column of the only row. Fails unless exactly one row matches.
    async fn query_for_object<T>(&self, sql: &str, params: &[&str]) -> CatalogResult<T>
    where
        T: FromSqlValue + Send,
    {
        let mut rows = self.fetch_rows(sql, params).await?;
        if rows.len() != 1 {
            return Err(CatalogError::incorrect_result_size(sql, 1, rows.len()));
        }
        let mut row = rows.remove(0);
        column_at(&mut row, 0, 0)
    }

    /// Every row passed through `mapper`.
    async fn query<T, M>(&self, sql: &str, mapper: &M, params: &[&str]) -> CatalogResult<Vec<T>>
    where
        T: Send,
        M: RowMapper<T>,
    {
        let rows = self.fetch_rows(sql, params).await?;
        rows.into_iter()
            .enumerate()
            .map(|(row_num, row)| mapper.map_row(row, row_num))
            .collect()
    }
}

impl<E: QueryExecutor> QueryExecutorExt for E {}
