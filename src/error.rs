use thiserror::Error;

use crate::types::SqlType;

/// Error type for optcol operations
#[derive(Debug, Error)]
pub enum OptColError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column index {index} out of range (row has {count} column(s))")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    #[error("Parameter indices start at 1, got {0}")]
    InvalidParameterIndex(usize),

    #[error("Parameter {0} was never bound")]
    UnboundParameter(usize),

    #[error("Unsupported type: {0}")]
    UnsupportedValueType(&'static str),

    #[error("Unsupported SQL type: {0}")]
    UnsupportedSqlType(SqlType),

    #[error("Unknown SQL type name: {0}")]
    UnknownSqlType(String),

    #[error("Unsupported column type: {0}")]
    UnsupportedColumnType(String),

    #[error("Cannot read {actual} value as {expected}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type alias for optcol operations
pub type Result<T> = std::result::Result<T, OptColError>;
