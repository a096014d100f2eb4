use std::error::Error;

use async_trait::async_trait;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use tokio_postgres::{Client, NoTls};

use crate::error::{OptColError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlType, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| OptColError::ConnectionFailed(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        tracing::debug!(sql, params = params.len(), "executing statement");

        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(sql_value_to_tosql).collect();

        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(query_failed)?;

        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(query_failed)?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let result_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| column_to_sql_value(row, i, col.type_()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawQueryResult::new(columns, result_rows))
    }
}

/// Keeps the server's message for database errors, which the client error's
/// own `Display` may omit.
fn query_failed(e: tokio_postgres::Error) -> OptColError {
    match e.as_db_error() {
        Some(db) => OptColError::QueryFailed(db.to_string()),
        None => OptColError::QueryFailed(e.to_string()),
    }
}

/// A NULL that binds to any parameter type; the server infers the column
/// type from the statement.
#[derive(Debug)]
struct NullParam;

impl ToSql for NullParam {
    fn to_sql(
        &self,
        _ty: &Type,
        _out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        Ok(IsNull::Yes)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// An instant that binds to both `timestamp` and `timestamptz` parameters.
/// `timestamp` receives the UTC wall-clock time.
#[derive(Debug)]
struct TimestampParam(DateTime<Utc>);

impl ToSql for TimestampParam {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        if *ty == Type::TIMESTAMP {
            self.0.naive_utc().to_sql(ty, out)
        } else {
            self.0.to_sql(ty, out)
        }
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::TIMESTAMP || *ty == Type::TIMESTAMPTZ
    }

    to_sql_checked!();
}

/// An integer that binds to `int2`, `int4` and `int8` parameters.
/// Values out of range for a narrower column fail instead of wrapping.
#[derive(Debug)]
struct IntegerParam(i64);

impl ToSql for IntegerParam {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        if *ty == Type::INT2 {
            i16::try_from(self.0)?.to_sql(ty, out)
        } else if *ty == Type::INT4 {
            i32::try_from(self.0)?.to_sql(ty, out)
        } else {
            self.0.to_sql(ty, out)
        }
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8
    }

    to_sql_checked!();
}

/// A floating point value that binds to `float4` and `float8` parameters.
#[derive(Debug)]
struct FloatParam(f64);

impl ToSql for FloatParam {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        if *ty == Type::FLOAT4 {
            let narrowed = self.0 as f32;
            if self.0.is_finite() && !narrowed.is_finite() {
                return Err(format!("value {} is out of range for type float4", self.0).into());
            }
            narrowed.to_sql(ty, out)
        } else {
            self.0.to_sql(ty, out)
        }
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::FLOAT4 || *ty == Type::FLOAT8
    }

    to_sql_checked!();
}

/// Convert a SqlValue to a boxed ToSql trait object.
fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null(_) => Box::new(NullParam),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(IntegerParam(i64::from(*i))),
        SqlValue::Int64(i) => Box::new(IntegerParam(*i)),
        SqlValue::Double(d) => Box::new(FloatParam(*d)),
        SqlValue::Decimal(d) => Box::new(*d),
        SqlValue::Bool(b) => Box::new(*b),
        SqlValue::Date(d) => Box::new(*d),
        SqlValue::Timestamp(ts) => Box::new(TimestampParam(*ts)),
    }
}

/// Maps a PostgreSQL column type to the SQL type a NULL cell is tagged with.
fn sql_type_of(ty: &Type) -> SqlType {
    if *ty == Type::BOOL {
        SqlType::Boolean
    } else if *ty == Type::INT2 {
        SqlType::SmallInt
    } else if *ty == Type::INT4 {
        SqlType::Integer
    } else if *ty == Type::INT8 {
        SqlType::BigInt
    } else if *ty == Type::FLOAT4 {
        SqlType::Real
    } else if *ty == Type::FLOAT8 {
        SqlType::Double
    } else if *ty == Type::NUMERIC {
        SqlType::Numeric
    } else if *ty == Type::BPCHAR {
        SqlType::Char
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::NAME {
        SqlType::VarChar
    } else if *ty == Type::DATE {
        SqlType::Date
    } else if *ty == Type::TIMESTAMP {
        SqlType::Timestamp
    } else if *ty == Type::TIMESTAMPTZ {
        SqlType::TimestampWithTimezone
    } else {
        SqlType::Other
    }
}

/// Convert the cell at a given index to a SqlValue according to its column type.
fn column_to_sql_value(row: &tokio_postgres::Row, index: usize, ty: &Type) -> Result<SqlValue> {
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index)
            .map(|v| v.map(SqlValue::Bool))
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| v.map(|i| SqlValue::Int32(i32::from(i))))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)
            .map(|v| v.map(SqlValue::Int32))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)
            .map(|v| v.map(SqlValue::Int64))
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map(|v| v.map(|f| SqlValue::Double(f64::from(f))))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index)
            .map(|v| v.map(SqlValue::Double))
    } else if *ty == Type::NUMERIC {
        row.try_get::<_, Option<Decimal>>(index)
            .map(|v| v.map(SqlValue::Decimal))
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR || *ty == Type::NAME
    {
        row.try_get::<_, Option<String>>(index)
            .map(|v| v.map(SqlValue::Text))
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(index)
            .map(|v| v.map(SqlValue::Date))
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(index)
            .map(|v| v.map(|ts| SqlValue::Timestamp(ts.and_utc())))
    } else if *ty == Type::TIMESTAMPTZ {
        row.try_get::<_, Option<DateTime<Utc>>>(index)
            .map(|v| v.map(SqlValue::Timestamp))
    } else {
        return Err(OptColError::UnsupportedColumnType(ty.name().to_string()));
    };

    let value = value.map_err(|e| OptColError::QueryFailed(e.to_string()))?;
    Ok(value.unwrap_or_else(|| SqlValue::Null(sql_type_of(ty))))
}
