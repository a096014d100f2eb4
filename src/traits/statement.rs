use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::types::{SqlType, SqlValue};

/// Positional parameter setters of a statement about to be executed.
/// Indices are 1-based.
pub trait PreparedStatement {
    fn set_string(&mut self, index: usize, value: &str) -> Result<()>;

    fn set_int(&mut self, index: usize, value: i32) -> Result<()>;

    fn set_long(&mut self, index: usize, value: i64) -> Result<()>;

    fn set_double(&mut self, index: usize, value: f64) -> Result<()>;

    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()>;

    fn set_bool(&mut self, index: usize, value: bool) -> Result<()>;

    fn set_date(&mut self, index: usize, value: NaiveDate) -> Result<()>;

    fn set_timestamp(&mut self, index: usize, value: DateTime<Utc>) -> Result<()>;

    /// Binds a NULL of the given type.
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<()>;
}

/// Read access to the current row of a query result.
pub trait ResultSet {
    fn get_object_by_name(&self, column_name: &str) -> Result<SqlValue>;

    /// Column indices are 1-based.
    fn get_object_by_index(&self, column_index: usize) -> Result<SqlValue>;

    /// Reports whether the last column read was NULL.
    fn was_null(&self) -> bool;

    fn get_date_by_name(&self, column_name: &str) -> Result<Option<NaiveDate>> {
        self.get_object_by_name(column_name)?.into_date()
    }

    fn get_date_by_index(&self, column_index: usize) -> Result<Option<NaiveDate>> {
        self.get_object_by_index(column_index)?.into_date()
    }

    fn get_timestamp_by_name(&self, column_name: &str) -> Result<Option<DateTime<Utc>>> {
        self.get_object_by_name(column_name)?.into_timestamp()
    }

    fn get_timestamp_by_index(&self, column_index: usize) -> Result<Option<DateTime<Utc>>> {
        self.get_object_by_index(column_index)?.into_timestamp()
    }
}

/// Read access to the output parameters of a stored-procedure call.
/// Indices are 1-based.
pub trait CallableStatement {
    fn get_object(&self, parameter_index: usize) -> Result<SqlValue>;

    /// Reports whether the last parameter read was NULL.
    fn was_null(&self) -> bool;

    fn get_date(&self, parameter_index: usize) -> Result<Option<NaiveDate>> {
        self.get_object(parameter_index)?.into_date()
    }

    fn get_timestamp(&self, parameter_index: usize) -> Result<Option<DateTime<Utc>>> {
        self.get_object(parameter_index)?.into_timestamp()
    }
}
