mod driver;
mod handler;
mod statement;

pub use driver::DatabaseDriver;
pub use handler::TypeHandler;
pub use statement::{CallableStatement, PreparedStatement, ResultSet};
