use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{OptColError, Result};
use crate::traits::PreparedStatement;
use crate::types::{SqlType, SqlValue};

/// Highest parameter index a statement can carry (PostgreSQL's wire limit).
pub const MAX_PARAMETER_INDEX: usize = u16::MAX as usize;

/// Collects positional parameters for a statement.
///
/// Setters may be called in any order; rebinding an index replaces the
/// earlier value.
#[derive(Debug, Clone, Default)]
pub struct ParameterBuffer {
    slots: Vec<Option<SqlValue>>,
}

impl ParameterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, index: usize, value: SqlValue) -> Result<()> {
        if index == 0 || index > MAX_PARAMETER_INDEX {
            return Err(OptColError::InvalidParameterIndex(index));
        }
        tracing::trace!(index, kind = value.kind(), "binding parameter");
        if self.slots.len() < index {
            self.slots.resize(index, None);
        }
        self.slots[index - 1] = Some(value);
        Ok(())
    }

    /// Returns the value bound at a 1-based index, if any.
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        index
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(Option::as_ref)
    }

    /// Returns the highest bound index.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consumes the buffer and returns the parameters in index order.
    /// Fails if any index below the highest bound one was skipped.
    pub fn into_params(self) -> Result<Vec<SqlValue>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(OptColError::UnboundParameter(i + 1)))
            .collect()
    }
}

impl PreparedStatement for ParameterBuffer {
    fn set_string(&mut self, index: usize, value: &str) -> Result<()> {
        self.bind(index, SqlValue::Text(value.to_string()))
    }

    fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        self.bind(index, SqlValue::Int32(value))
    }

    fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        self.bind(index, SqlValue::Int64(value))
    }

    fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        self.bind(index, SqlValue::Double(value))
    }

    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()> {
        self.bind(index, SqlValue::Decimal(value))
    }

    fn set_bool(&mut self, index: usize, value: bool) -> Result<()> {
        self.bind(index, SqlValue::Bool(value))
    }

    fn set_date(&mut self, index: usize, value: NaiveDate) -> Result<()> {
        self.bind(index, SqlValue::Date(value))
    }

    fn set_timestamp(&mut self, index: usize, value: DateTime<Utc>) -> Result<()> {
        self.bind(index, SqlValue::Timestamp(value))
    }

    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
        self.bind(index, SqlValue::Null(sql_type))
    }
}
