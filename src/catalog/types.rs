//! Catalog result types.

use bigdecimal::BigDecimal;
use serde::Serialize;

/// `ALL_CONSTRAINTS.CONSTRAINT_TYPE` code for a primary key.
pub const CONSTRAINT_TYPE_PRIMARY_KEY: &str = "P";

/// Returns `true` if an Oracle `DATA_TYPE` belongs to the exact numeric family.
///
/// `BINARY_FLOAT` and `BINARY_DOUBLE` are IEEE types that can hold NaN and
/// infinities, so they are profiled as text.
pub fn is_numeric_type(data_type: &str) -> bool {
    let upper = data_type.trim().to_uppercase();
    if upper.starts_with("BINARY_") {
        return false;
    }
    upper.contains("NUMBER") || matches!(upper.as_str(), "FLOAT" | "DECIMAL" | "INTEGER")
}

/// Min, max, and median of a numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStats {
    pub min: BigDecimal,
    pub max: BigDecimal,
    pub median: BigDecimal,
}

/// Values of one column, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnData {
    /// Values of a numeric column with statistics over its non-NULL values.
    Numeric {
        values: Vec<Option<BigDecimal>>,
        /// `None` when the column holds no non-NULL value.
        stats: Option<ColumnStats>,
    },
    /// Raw textual values of any other column.
    Text { values: Vec<Option<String>> },
}

impl ColumnData {
    /// Number of fetched values, NULLs included.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric { values, .. } => values.len(),
            ColumnData::Text { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One column's observed data.
///
/// Statistics exist only on numeric columns, which the constructors
/// enforce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    data_type: String,
    #[serde(flatten)]
    data: ColumnData,
}

impl Column {
    /// Create a numeric column and compute its statistics.
    pub fn numeric(
        name: impl Into<String>,
        data_type: impl Into<String>,
        values: Vec<Option<BigDecimal>>,
    ) -> Self {
        let stats = ColumnStats::compute(&values);
        Self {
            name: name.into(),
            data_type: data_type.into(),
            data: ColumnData::Numeric { values, stats },
        }
    }

    /// Create a text column. No statistics are kept.
    pub fn text(
        name: impl Into<String>,
        data_type: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            data: ColumnData::Text { values },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type as reported by `USER_TAB_COLS.DATA_TYPE`.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric { .. })
    }

    /// Statistics, present only for numeric columns with data.
    pub fn stats(&self) -> Option<&ColumnStats> {
        match &self.data {
            ColumnData::Numeric { stats, .. } => stats.as_ref(),
            ColumnData::Text { .. } => None,
        }
    }

    pub fn min(&self) -> Option<BigDecimal> {
        self.stats().map(|s| s.min.clone())
    }

    pub fn max(&self) -> Option<BigDecimal> {
        self.stats().map(|s| s.max.clone())
    }

    pub fn median(&self) -> Option<BigDecimal> {
        self.stats().map(|s| s.median.clone())
    }
}

/// One row of `ALL_CONSTRAINTS` for a table.
///
/// Despite the name, this can describe any constraint kind; check
/// [`PrimaryKey::is_primary_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub constraint_name: String,
    pub constraint_type: String,
}

impl PrimaryKey {
    pub fn new(constraint_name: impl Into<String>, constraint_type: impl Into<String>) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            constraint_type: constraint_type.into(),
        }
    }

    /// Whether the constraint type code is `P`.
    pub fn is_primary_key(&self) -> bool {
        self.constraint_type == CONSTRAINT_TYPE_PRIMARY_KEY
    }
}

/// Aggregated profile of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInformation {
    column_count: usize,
    columns: Vec<Column>,
    primary_keys: Vec<PrimaryKey>,
}

impl TableInformation {
    pub fn new(columns: Vec<Column>, primary_keys: Vec<PrimaryKey>) -> Self {
        Self {
            column_count: columns.len(),
            columns,
            primary_keys,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Columns in catalog order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Every constraint row returned for the table, unfiltered.
    pub fn primary_keys(&self) -> &[PrimaryKey] {
        &self.primary_keys
    }

    /// Only the constraints whose type code is `P`.
    pub fn primary_key_constraints(&self) -> impl Iterator<Item = &PrimaryKey> {
        self.primary_keys.iter().filter(|pk| pk.is_primary_key())
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
