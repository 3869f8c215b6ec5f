//! Identifier validation and quoting for the Oracle dialect.
//!
//! Table and column names cannot be bound as statement parameters, so the
//! value query has to splice them into the SQL text. Every identifier is
//! validated and then wrapped in double quotes with embedded quotes
//! doubled, which makes Oracle resolve the name exactly as the catalog
//! stores it.

use super::error::{CatalogError, CatalogResult};

/// Longest identifier accepted (Oracle 12.2+ allows 128 bytes).
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier before it is used in dynamic SQL.
///
/// Rejects empty names, names containing NUL bytes, and names longer than
/// [`MAX_IDENTIFIER_LENGTH`] bytes.
pub fn validate_identifier(name: &str) -> CatalogResult<()> {
    if name.is_empty() {
        return Err(CatalogError::InvalidIdentifier(
            "identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(CatalogError::InvalidIdentifier(format!(
            "identifier contains a NUL byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(CatalogError::InvalidIdentifier(format!(
            "identifier exceeds {} bytes (got {}): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote an Oracle identifier.
///
/// ```ignore
/// assert_eq!(quote_oracle("ORDERS")?, "\"ORDERS\"");
/// assert_eq!(quote_oracle("A\"B")?, "\"A\"\"B\"");
/// ```
pub fn quote_oracle(name: &str) -> CatalogResult<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
