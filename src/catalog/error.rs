//! Catalog inspection error types.

use thiserror::Error;

use crate::worker::WorkerError;

/// Type-erased failure reported by a query executor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while inspecting the catalog.
///
/// None of these are recovered locally: an inspection either fully
/// succeeds or fails with the first error encountered.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The query executor failed to run a statement.
    ///
    /// The source is whatever the executor reports; for the worker-backed
    /// executor it is a [`WorkerError`].
    #[error("query execution failed: {0}")]
    Execution(#[source] BoxError),

    /// A scalar lookup matched the wrong number of rows.
    #[error("incorrect result size for `{sql}`: expected {expected}, actual {actual}")]
    IncorrectResultSize {
        /// The statement that was executed.
        sql: String,
        /// Number of rows the caller required.
        expected: usize,
        /// Number of rows actually returned.
        actual: usize,
    },

    /// An identifier was rejected before being spliced into a statement.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A value could not be converted to the requested type.
    #[error("cannot convert {value:?} to {target}")]
    Conversion {
        /// Textual form of the offending value.
        value: String,
        /// Name of the requested type.
        target: &'static str,
    },

    /// A NULL was returned where a value was required.
    #[error("unexpected NULL where {target} was required")]
    UnexpectedNull {
        /// Name of the requested type.
        target: &'static str,
    },

    /// A row had fewer columns than the row mapper reads.
    #[error("row {row} has no column at index {index}")]
    MissingColumn {
        /// Zero-based row number.
        row: usize,
        /// Zero-based column index that was requested.
        index: usize,
    },
}

impl CatalogError {
    /// Build a cardinality error for a single-row lookup.
    pub fn incorrect_result_size(sql: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::IncorrectResultSize {
            sql: sql.into(),
            expected,
            actual,
        }
    }

    /// Wrap an executor failure.
    pub fn execution(source: impl Into<BoxError>) -> Self {
        Self::Execution(source.into())
    }

    /// Check whether this error came from the underlying executor rather
    /// than from result handling.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// The worker error behind an execution failure, if the executor was
    /// the worker.
    pub fn worker_error(&self) -> Option<&WorkerError> {
        match self {
            Self::Execution(source) => source.downcast_ref::<WorkerError>(),
            _ => None,
        }
    }
}

impl From<WorkerError> for CatalogError {
    fn from(err: WorkerError) -> Self {
        Self::Execution(Box::new(err))
    }
}
