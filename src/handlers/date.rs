use chrono::NaiveDate;

use crate::error::Result;
use crate::traits::{CallableStatement, PreparedStatement, ResultSet, TypeHandler};
use crate::types::SqlType;

/// Handler for `Option<NaiveDate>` columns.
///
/// Absent values are always written as a `DATE` NULL, whatever type the
/// column was declared with.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalDateTypeHandler;

impl OptionalDateTypeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl TypeHandler for OptionalDateTypeHandler {
    type Value = NaiveDate;

    fn set_parameter(
        &self,
        ps: &mut dyn PreparedStatement,
        index: usize,
        parameter: &Option<NaiveDate>,
        _sql_type: SqlType,
    ) -> Result<()> {
        match parameter {
            Some(date) => ps.set_date(index, *date),
            None => {
                tracing::debug!(index, "binding NULL date");
                ps.set_null(index, SqlType::Date)
            }
        }
    }

    fn get_result_by_name(&self, rs: &dyn ResultSet, column_name: &str) -> Result<Option<NaiveDate>> {
        rs.get_date_by_name(column_name)
    }

    fn get_result_by_index(&self, rs: &dyn ResultSet, column_index: usize) -> Result<Option<NaiveDate>> {
        rs.get_date_by_index(column_index)
    }

    fn get_output(
        &self,
        cs: &dyn CallableStatement,
        parameter_index: usize,
    ) -> Result<Option<NaiveDate>> {
        cs.get_date(parameter_index)
    }
}
