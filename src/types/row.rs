use std::cell::Cell;

use crate::error::{OptColError, Result};
use crate::traits::{CallableStatement, ResultSet};
use crate::types::SqlValue;

/// Driver-agnostic raw result from a database query.
#[derive(Debug, Clone)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of values in column order
    pub rows: Vec<Vec<SqlValue>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A single row result from a query.
/// Values keep their column order and can be read by name or by 1-based index.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
    last_was_null: Cell<bool>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<SqlValue>) -> Self {
        Self {
            columns: columns.to_vec(),
            values,
            last_was_null: Cell::new(false),
        }
    }

    /// Gets a value by column name. Exact matches win over
    /// case-insensitive ones.
    pub fn get(&self, column_name: &str) -> Result<&SqlValue> {
        let position = self
            .columns
            .iter()
            .position(|c| c == column_name)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(column_name))
            })
            .ok_or_else(|| OptColError::ColumnNotFound(column_name.to_string()))?;
        self.values
            .get(position)
            .ok_or_else(|| OptColError::ColumnNotFound(column_name.to_string()))
    }

    /// Gets a value by 1-based column index.
    pub fn get_at(&self, column_index: usize) -> Result<&SqlValue> {
        column_index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .ok_or(OptColError::ColumnIndexOutOfRange {
                index: column_index,
                count: self.values.len(),
            })
    }

    fn track(&self, value: &SqlValue) -> SqlValue {
        self.last_was_null.set(value.is_null());
        value.clone()
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ResultSet for Row {
    fn get_object_by_name(&self, column_name: &str) -> Result<SqlValue> {
        let value = self.get(column_name)?;
        Ok(self.track(value))
    }

    fn get_object_by_index(&self, column_index: usize) -> Result<SqlValue> {
        let value = self.get_at(column_index)?;
        Ok(self.track(value))
    }

    fn was_null(&self) -> bool {
        self.last_was_null.get()
    }
}

/// Output parameters returned by a stored-procedure call, read by 1-based
/// parameter index.
#[derive(Debug, Clone)]
pub struct OutputParameters {
    row: Row,
}

impl OutputParameters {
    pub fn new(row: Row) -> Self {
        Self { row }
    }

    /// Returns the number of output parameters.
    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }
}

impl CallableStatement for OutputParameters {
    fn get_object(&self, parameter_index: usize) -> Result<SqlValue> {
        self.row.get_object_by_index(parameter_index)
    }

    fn was_null(&self) -> bool {
        ResultSet::was_null(&self.row)
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self {
            columns: raw.columns,
            rows,
        }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(OptColError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Treats the single returned row as the output parameters of a
    /// procedure call.
    pub fn into_output_parameters(self) -> Result<OutputParameters> {
        self.single_row().map(OutputParameters::new)
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
