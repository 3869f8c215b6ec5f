//! Oracle catalog query templates.
//!
//! These statements are fixed protocol constants. Parameters are bound
//! positionally through `?` placeholders.

use super::error::CatalogResult;
use super::identifier::quote_oracle;

/// All users, which Oracle treats as schemas.
pub const GET_SCHEMAS: &str = "SELECT USERNAME AS SCHEMA_NAME FROM SYS.DBA_USERS";

/// Tables visible to the connected user.
pub const GET_TABLES: &str = "SELECT TABLE_NAME FROM ALL_TABLES";

/// Column names of one table. Binds the table name.
pub const GET_COLUMNS: &str = "SELECT COLUMN_NAME FROM USER_TAB_COLS WHERE TABLE_NAME = ?";

/// Every constraint of one table, not only the primary key. Binds the table name.
pub const GET_PRIMARY_KEYS: &str =
    "SELECT CONSTRAINT_NAME, CONSTRAINT_TYPE FROM ALL_CONSTRAINTS WHERE TABLE_NAME = ?";

/// Declared data type of one column. Binds the table name, then the column name.
pub const GET_COLUMN_DATA_TYPE: &str =
    "SELECT DATA_TYPE FROM USER_TAB_COLS WHERE table_name = ? AND COLUMN_NAME = ?";

/// Build the statement that fetches every value of one column.
pub fn select_column_values(table: &str, column: &str) -> CatalogResult<String> {
    Ok(format!(
        "SELECT {} FROM {}",
        quote_oracle(column)?,
        quote_oracle(table)?
    ))
}
