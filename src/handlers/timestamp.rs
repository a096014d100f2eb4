use chrono::{DateTime, FixedOffset, Utc};

use crate::error::Result;
use crate::traits::{CallableStatement, PreparedStatement, ResultSet, TypeHandler};
use crate::types::SqlType;

/// Offset applied to timestamps read back from the database (UTC+09:00).
pub const DEFAULT_READ_OFFSET_SECS: i32 = 9 * 3600;

const DEFAULT_READ_OFFSET: FixedOffset = match FixedOffset::east_opt(DEFAULT_READ_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("DEFAULT_READ_OFFSET_SECS is not a valid offset"),
};

/// Handler for `Option<DateTime<FixedOffset>>` columns.
///
/// Values are written as instants; the offset they carried is not stored.
/// On read, instants are normalized to the handler's fixed offset, so a value
/// round trips exactly when it was built with that same offset.
#[derive(Debug, Clone, Copy)]
pub struct OptionalTimestampTypeHandler {
    offset: FixedOffset,
}

impl OptionalTimestampTypeHandler {
    pub fn new() -> Self {
        Self {
            offset: DEFAULT_READ_OFFSET,
        }
    }

    /// Reads timestamps back at `offset` instead of the default.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn normalize(&self, ts: Option<DateTime<Utc>>) -> Option<DateTime<FixedOffset>> {
        ts.map(|ts| ts.with_timezone(&self.offset))
    }
}

impl Default for OptionalTimestampTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for OptionalTimestampTypeHandler {
    type Value = DateTime<FixedOffset>;

    fn set_parameter(
        &self,
        ps: &mut dyn PreparedStatement,
        index: usize,
        parameter: &Option<DateTime<FixedOffset>>,
        _sql_type: SqlType,
    ) -> Result<()> {
        match parameter {
            Some(ts) => ps.set_timestamp(index, ts.with_timezone(&Utc)),
            None => {
                tracing::debug!(index, "binding NULL timestamp");
                ps.set_null(index, SqlType::Timestamp)
            }
        }
    }

    fn get_result_by_name(
        &self,
        rs: &dyn ResultSet,
        column_name: &str,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        Ok(self.normalize(rs.get_timestamp_by_name(column_name)?))
    }

    fn get_result_by_index(
        &self,
        rs: &dyn ResultSet,
        column_index: usize,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        Ok(self.normalize(rs.get_timestamp_by_index(column_index)?))
    }

    fn get_output(
        &self,
        cs: &dyn CallableStatement,
        parameter_index: usize,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        Ok(self.normalize(cs.get_timestamp(parameter_index)?))
    }
}
