#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use optcol::handlers::{OptionalDateTypeHandler, OptionalTimestampTypeHandler, OptionalTypeHandler};
use optcol::{ParameterBuffer, PreparedStatement, ResultSet, SqlType, TypeHandler};

pub const INSERT_SQL: &str = "INSERT INTO test_entity \
     (id, name, age, salary, rate, amount, active, birth_date, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";

pub const SELECT_SQL: &str = "SELECT id, name, age, salary, rate, amount, active, birth_date, created_at \
     FROM test_entity WHERE id = $1";

pub const COLUMNS: [&str; 9] = [
    "id",
    "name",
    "age",
    "salary",
    "rate",
    "amount",
    "active",
    "birth_date",
    "created_at",
];

/// Row mapped to/from the `test_entity` table.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntity {
    pub id: i32,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub salary: Option<i64>,
    pub rate: Option<f64>,
    pub amount: Option<Decimal>,
    pub active: Option<bool>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl TestEntity {
    pub fn empty(id: i32) -> Self {
        Self {
            id,
            name: None,
            age: None,
            salary: None,
            rate: None,
            amount: None,
            active: None,
            birth_date: None,
            created_at: None,
        }
    }

    pub fn full(id: i32) -> Self {
        Self {
            id,
            name: Some("John Doe".to_string()),
            age: Some(30),
            salary: Some(50_000),
            rate: Some(0.15),
            amount: Some(Decimal::new(123_456, 2)),
            active: Some(true),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 15),
            created_at: Some(
                DateTime::parse_from_rfc3339("2024-01-01T10:30:00+09:00").unwrap(),
            ),
        }
    }
}

pub fn bind_insert(entity: &TestEntity) -> optcol::Result<ParameterBuffer> {
    let mut ps = ParameterBuffer::new();
    ps.set_int(1, entity.id)?;
    OptionalTypeHandler::<String>::new().set_parameter(&mut ps, 2, &entity.name, SqlType::VarChar)?;
    OptionalTypeHandler::<i32>::new().set_parameter(&mut ps, 3, &entity.age, SqlType::Integer)?;
    OptionalTypeHandler::<i64>::new().set_parameter(&mut ps, 4, &entity.salary, SqlType::BigInt)?;
    OptionalTypeHandler::<f64>::new().set_parameter(&mut ps, 5, &entity.rate, SqlType::Double)?;
    OptionalTypeHandler::<Decimal>::new().set_parameter(
        &mut ps,
        6,
        &entity.amount,
        SqlType::Numeric,
    )?;
    OptionalTypeHandler::<bool>::new().set_parameter(&mut ps, 7, &entity.active, SqlType::Bit)?;
    OptionalDateTypeHandler.set_parameter(&mut ps, 8, &entity.birth_date, SqlType::Date)?;
    OptionalTimestampTypeHandler::new().set_parameter(
        &mut ps,
        9,
        &entity.created_at,
        SqlType::TimestampWithTimezone,
    )?;
    Ok(ps)
}

pub fn bind_id(id: i32) -> optcol::Result<ParameterBuffer> {
    let mut ps = ParameterBuffer::new();
    ps.set_int(1, id)?;
    Ok(ps)
}

pub fn map_row(rs: &dyn ResultSet) -> optcol::Result<TestEntity> {
    let id = OptionalTypeHandler::<i32>::new()
        .get_result_by_name(rs, "id")?
        .ok_or_else(|| optcol::OptColError::ColumnNotFound("id".to_string()))?;
    Ok(TestEntity {
        id,
        name: OptionalTypeHandler::<String>::new().get_result_by_name(rs, "name")?,
        age: OptionalTypeHandler::<i32>::new().get_result_by_name(rs, "age")?,
        salary: OptionalTypeHandler::<i64>::new().get_result_by_name(rs, "salary")?,
        rate: OptionalTypeHandler::<f64>::new().get_result_by_name(rs, "rate")?,
        amount: OptionalTypeHandler::<Decimal>::new().get_result_by_name(rs, "amount")?,
        active: OptionalTypeHandler::<bool>::new().get_result_by_name(rs, "active")?,
        birth_date: OptionalDateTypeHandler.get_result_by_index(rs, 8)?,
        created_at: OptionalTimestampTypeHandler::new().get_result_by_index(rs, 9)?,
    })
}
