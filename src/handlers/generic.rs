use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;

use crate::error::{OptColError, Result};
use crate::traits::{CallableStatement, PreparedStatement, ResultSet, TypeHandler};
use crate::types::{SqlType, SqlValue};

/// A scalar that can travel inside `Option<T>` through [`OptionalTypeHandler`].
pub trait OptionalScalar: Sized {
    /// Tags the value with its SQL kind.
    fn to_sql_value(&self) -> SqlValue;

    /// Converts a non-NULL column value back. Fails if the column holds a
    /// different kind.
    fn from_sql_value(value: SqlValue) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, value: &SqlValue) -> Result<T> {
    Err(OptColError::TypeMismatch {
        expected,
        actual: value.kind(),
    })
}

impl OptionalScalar for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Text(s) => Ok(s),
            other => mismatch("text", &other),
        }
    }
}

impl OptionalScalar for i32 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Int32(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Int32(i) => Ok(i),
            other => mismatch("int32", &other),
        }
    }
}

impl OptionalScalar for i64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Int64(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Int64(i) => Ok(i),
            other => mismatch("int64", &other),
        }
    }
}

impl OptionalScalar for f64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Double(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Double(d) => Ok(d),
            other => mismatch("double", &other),
        }
    }
}

impl OptionalScalar for Decimal {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Decimal(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Decimal(d) => Ok(d),
            other => mismatch("decimal", &other),
        }
    }
}

impl OptionalScalar for bool {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bool(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Bool(b) => Ok(b),
            other => mismatch("bool", &other),
        }
    }
}

impl OptionalScalar for DateTime<Utc> {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Timestamp(*self)
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Timestamp(ts) => Ok(ts),
            other => mismatch("timestamp", &other),
        }
    }
}

/// Read back at UTC; use [`OptionalTimestampTypeHandler`] for a fixed
/// application offset.
///
/// [`OptionalTimestampTypeHandler`]: crate::handlers::OptionalTimestampTypeHandler
impl OptionalScalar for DateTime<FixedOffset> {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Timestamp(self.with_timezone(&Utc))
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        DateTime::<Utc>::from_sql_value(value).map(DateTime::<FixedOffset>::from)
    }
}

/// Passes values through untouched, for callers that only know the kind at
/// runtime.
impl OptionalScalar for SqlValue {
    fn to_sql_value(&self) -> SqlValue {
        self.clone()
    }

    fn from_sql_value(value: SqlValue) -> Result<Self> {
        Ok(value)
    }
}

/// Maps a declared column type to the type code a NULL is written with.
pub fn null_type_for(sql_type: SqlType) -> Result<SqlType> {
    match sql_type {
        SqlType::BigInt
        | SqlType::Bit
        | SqlType::Boolean
        | SqlType::Char
        | SqlType::Date
        | SqlType::Decimal
        | SqlType::Double
        | SqlType::Integer
        | SqlType::Numeric
        | SqlType::Other
        | SqlType::Real
        | SqlType::SmallInt
        | SqlType::Timestamp
        | SqlType::TimestampWithTimezone
        | SqlType::VarChar => Ok(sql_type),
        unsupported => {
            tracing::error!(sql_type = %unsupported, "no NULL mapping for declared column type");
            Err(OptColError::UnsupportedSqlType(unsupported))
        }
    }
}

/// Handler for `Option<T>` over the common scalar kinds.
///
/// Present values are dispatched on their kind to the matching setter.
/// Absent values are written as a NULL of the declared column type.
pub struct OptionalTypeHandler<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> OptionalTypeHandler<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for OptionalTypeHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OptionalTypeHandler<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OptionalTypeHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalTypeHandler")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: OptionalScalar> OptionalTypeHandler<T> {
    fn present(value: SqlValue, was_null: bool) -> Result<Option<T>> {
        if value.is_null() || was_null {
            return Ok(None);
        }
        T::from_sql_value(value).map(Some)
    }
}

impl<T: OptionalScalar> TypeHandler for OptionalTypeHandler<T> {
    type Value = T;

    fn set_parameter(
        &self,
        ps: &mut dyn PreparedStatement,
        index: usize,
        parameter: &Option<T>,
        sql_type: SqlType,
    ) -> Result<()> {
        match parameter.as_ref().map(T::to_sql_value) {
            Some(SqlValue::Text(s)) => ps.set_string(index, &s),
            Some(SqlValue::Int32(i)) => ps.set_int(index, i),
            Some(SqlValue::Bool(b)) => ps.set_bool(index, b),
            Some(SqlValue::Decimal(d)) => ps.set_decimal(index, d),
            Some(SqlValue::Timestamp(ts)) => ps.set_timestamp(index, ts),
            Some(SqlValue::Int64(i)) => ps.set_long(index, i),
            Some(SqlValue::Double(d)) => ps.set_double(index, d),
            None => {
                let null_type = null_type_for(sql_type)?;
                tracing::debug!(index, sql_type = %null_type, "binding NULL");
                ps.set_null(index, null_type)
            }
            Some(other) => {
                tracing::error!(index, kind = other.kind(), "unsupported value type");
                Err(OptColError::UnsupportedValueType(other.kind()))
            }
        }
    }

    fn get_result_by_name(&self, rs: &dyn ResultSet, column_name: &str) -> Result<Option<T>> {
        let value = rs.get_object_by_name(column_name)?;
        Self::present(value, rs.was_null())
    }

    fn get_result_by_index(&self, rs: &dyn ResultSet, column_index: usize) -> Result<Option<T>> {
        let value = rs.get_object_by_index(column_index)?;
        Self::present(value, rs.was_null())
    }

    fn get_output(&self, cs: &dyn CallableStatement, parameter_index: usize) -> Result<Option<T>> {
        let value = cs.get_object(parameter_index)?;
        Self::present(value, cs.was_null())
    }
}
