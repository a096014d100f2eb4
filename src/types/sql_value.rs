use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::error::{OptColError, Result};
use crate::types::SqlType;

/// Represents a SQL parameter or column value in a driver-agnostic way.
/// Drivers are responsible for converting these to their native types.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL, tagged with the column type it was written or read as.
    Null(SqlType),
    Text(String),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal(Decimal),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Short name of the contained kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null(_) => "null",
            SqlValue::Text(_) => "text",
            SqlValue::Int32(_) => "int32",
            SqlValue::Int64(_) => "int64",
            SqlValue::Double(_) => "double",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Bool(_) => "bool",
            SqlValue::Date(_) => "date",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    /// Reads the value as a calendar date. A timestamp yields its UTC date.
    pub fn into_date(self) -> Result<Option<NaiveDate>> {
        match self {
            SqlValue::Null(_) => Ok(None),
            SqlValue::Date(d) => Ok(Some(d)),
            SqlValue::Timestamp(ts) => Ok(Some(ts.date_naive())),
            other => Err(OptColError::TypeMismatch {
                expected: "date",
                actual: other.kind(),
            }),
        }
    }

    /// Reads the value as an instant. A date yields UTC midnight.
    pub fn into_timestamp(self) -> Result<Option<DateTime<Utc>>> {
        match self {
            SqlValue::Null(_) => Ok(None),
            SqlValue::Timestamp(ts) => Ok(Some(ts)),
            SqlValue::Date(d) => Ok(Some(d.and_time(NaiveTime::MIN).and_utc())),
            other => Err(OptColError::TypeMismatch {
                expected: "timestamp",
                actual: other.kind(),
            }),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Double(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}
