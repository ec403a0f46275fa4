//! Error types for the tablecore query engine.
use crate::types::ColumnType;
use thiserror::Error;

/// The primary error type for filter evaluation, grouping and summarizing.
///
/// Missing values are never reported through this type: every predicate and
/// accessor has a defined answer for them.
#[derive(Error, Debug)]
pub enum TableError {
    /// A column name used by a filter, grouping or summarizer does not exist
    /// in the table it was resolved against.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A column with the same name is already part of the table.
    #[error("Column '{0}' already exists in table")]
    DuplicateColumn(String),

    /// A column being added to a table, or paired with another column by a
    /// column-to-column predicate, has a different number of rows.
    #[error("Row count mismatch for column '{column}': expected {expected}, got {actual}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A predicate or value was applied to a column of the wrong type.
    #[error("Type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: ColumnType,
    },

    /// Positional summarizing pairs columns and functions one to one.
    #[error("{functions} aggregate functions supplied for {columns} columns")]
    ArgumentCount { columns: usize, functions: usize },

    /// A function was paired with a column type it cannot reduce.
    #[error("Aggregate function '{function}' is not compatible with column '{column}' of type {column_type}")]
    IncompatibleFunction {
        function: String,
        column: String,
        column_type: ColumnType,
    },

    /// A column-to-column predicate names its second column, which can only be
    /// resolved against a table.
    #[error("Column reference '{0}' cannot be resolved without a table")]
    UnresolvedColumnReference(String),

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Represents an error in caller-supplied arguments (e.g. a zero step size).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, TableError>`.
pub type Result<T, E = TableError> = std::result::Result<T, E>;
