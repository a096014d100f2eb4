mod row;
mod sql_type;
mod sql_value;

pub use row::{OutputParameters, QueryResult, RawQueryResult, Row};
pub use sql_type::SqlType;
pub use sql_value::SqlValue;
