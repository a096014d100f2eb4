//! optcol - Optional-value type handlers for nullable SQL columns
//!
//! Handlers convert between `Option<T>` in application code and a nullable
//! column: a present value is written with the type-specific setter, an
//! absent one as a typed NULL, and a NULL column reads back as `None`.
//!
//! # Example
//! ```ignore
//! use optcol::handlers::{OptionalDateTypeHandler, OptionalTypeHandler};
//! use optcol::{OptColClient, ParameterBuffer, SqlType, TypeHandler};
//!
//! let client = OptColClient::connect("postgres://localhost/mydb").await?;
//!
//! let mut params = ParameterBuffer::new();
//! params.set_int(1, 1)?;
//! OptionalTypeHandler::<String>::new().set_parameter(&mut params, 2, &name, SqlType::VarChar)?;
//! OptionalDateTypeHandler.set_parameter(&mut params, 3, &birth_date, SqlType::Date)?;
//! client
//!     .execute("INSERT INTO person (id, name, birth_date) VALUES ($1, $2, $3)", params)
//!     .await?;
//!
//! let mut params = ParameterBuffer::new();
//! params.set_int(1, 1)?;
//! let row = client
//!     .execute("SELECT name, birth_date FROM person WHERE id = $1", params)
//!     .await?
//!     .single_row()?;
//! let name = OptionalTypeHandler::<String>::new().get_result_by_name(&row, "name")?;
//! let birth_date = OptionalDateTypeHandler.get_result_by_index(&row, 2)?;
//! ```

pub mod drivers;
pub mod error;
pub mod handlers;
pub mod statement;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use client::OptColClient;
pub use error::{OptColError, Result};
pub use handlers::{
    OptionalDateTypeHandler, OptionalScalar, OptionalTimestampTypeHandler, OptionalTypeHandler,
};
pub use statement::ParameterBuffer;
pub use traits::{CallableStatement, DatabaseDriver, PreparedStatement, ResultSet, TypeHandler};
pub use types::{OutputParameters, QueryResult, RawQueryResult, Row, SqlType, SqlValue};
