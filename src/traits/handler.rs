use crate::error::Result;
use crate::traits::{CallableStatement, PreparedStatement, ResultSet};
use crate::types::SqlType;

/// Converts between a nullable column and an optional application value.
///
/// A handler is invoked by the host at the point it binds a statement
/// parameter or decodes a result column. Handlers hold no per-call state and
/// may be shared freely.
pub trait TypeHandler: Send + Sync {
    /// The scalar carried inside the `Option`.
    type Value;

    /// Binds `parameter` at `index`. An absent value is bound as a NULL whose
    /// type is derived from `sql_type` or fixed by the handler.
    fn set_parameter(
        &self,
        ps: &mut dyn PreparedStatement,
        index: usize,
        parameter: &Option<Self::Value>,
        sql_type: SqlType,
    ) -> Result<()>;

    /// Reads the named column of the current row.
    fn get_result_by_name(
        &self,
        rs: &dyn ResultSet,
        column_name: &str,
    ) -> Result<Option<Self::Value>>;

    /// Reads the column at a 1-based index of the current row.
    fn get_result_by_index(
        &self,
        rs: &dyn ResultSet,
        column_index: usize,
    ) -> Result<Option<Self::Value>>;

    /// Reads a stored-procedure output parameter.
    fn get_output(
        &self,
        cs: &dyn CallableStatement,
        parameter_index: usize,
    ) -> Result<Option<Self::Value>>;
}
