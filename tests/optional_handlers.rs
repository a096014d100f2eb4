mod common;

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use common::{bind_id, bind_insert, map_row, TestEntity, COLUMNS, INSERT_SQL, SELECT_SQL};
use optcol::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
use optcol::handlers::{OptionalDateTypeHandler, OptionalTimestampTypeHandler, OptionalTypeHandler};
use optcol::traits::DatabaseDriver;
use optcol::types::{QueryResult, SqlType, SqlValue};
use optcol::{OptColClient, OptColError, ParameterBuffer, PreparedStatement, TypeHandler};

fn client_for(driver: &Arc<InMemoryTestDriver>) -> OptColClient {
    let driver: Arc<dyn DatabaseDriver> = Arc::clone(driver) as Arc<dyn DatabaseDriver>;
    OptColClient::with_driver(driver)
}

/// Replays the parameters of an insert as the row a select would return.
fn echo_insert(driver: &InMemoryTestDriver) -> optcol::RawQueryResult {
    let inserted = driver.last_query().expect("No queries were recorded");
    InMemoryTestResponseBuilder::new()
        .columns(&COLUMNS)
        .row(inserted.params)
        .build()
}

#[tokio::test]
async fn test_insert_binds_all_present_values() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);

    client
        .execute(INSERT_SQL, bind_insert(&TestEntity::full(1)).unwrap())
        .await
        .unwrap();

    in_memory_test_driver.assert_query_count(1);
    in_memory_test_driver.assert_last_query(
        INSERT_SQL,
        &[
            SqlValue::Int32(1),
            SqlValue::Text("John Doe".to_string()),
            SqlValue::Int32(30),
            SqlValue::Int64(50_000),
            SqlValue::Double(0.15),
            SqlValue::Decimal(Decimal::new(123_456, 2)),
            SqlValue::Bool(true),
            SqlValue::Date(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap()),
            SqlValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap()),
        ],
    );
}

#[tokio::test]
async fn test_insert_binds_typed_nulls_for_absent_values() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);

    client
        .execute(INSERT_SQL, bind_insert(&TestEntity::empty(2)).unwrap())
        .await
        .unwrap();

    // Date and timestamp handlers ignore the declared type.
    in_memory_test_driver.assert_last_query(
        INSERT_SQL,
        &[
            SqlValue::Int32(2),
            SqlValue::Null(SqlType::VarChar),
            SqlValue::Null(SqlType::Integer),
            SqlValue::Null(SqlType::BigInt),
            SqlValue::Null(SqlType::Double),
            SqlValue::Null(SqlType::Numeric),
            SqlValue::Null(SqlType::Bit),
            SqlValue::Null(SqlType::Date),
            SqlValue::Null(SqlType::Timestamp),
        ],
    );
}

#[tokio::test]
async fn test_round_trip_all_values() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);
    let entity = TestEntity::full(1);

    client
        .execute(INSERT_SQL, bind_insert(&entity).unwrap())
        .await
        .unwrap();
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new().with_response(echo_insert(&in_memory_test_driver)),
    );
    let client = client_for(&in_memory_test_driver);

    let row = client
        .execute(SELECT_SQL, bind_id(1).unwrap())
        .await
        .unwrap()
        .single_row()
        .unwrap();

    in_memory_test_driver.assert_last_query(SELECT_SQL, &[SqlValue::Int32(1)]);
    let result = map_row(&row).unwrap();
    assert_eq!(result, entity);
    assert_eq!(
        result.created_at.unwrap().offset(),
        &FixedOffset::east_opt(9 * 3600).unwrap()
    );
}

#[tokio::test]
async fn test_round_trip_empty_values() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);
    let entity = TestEntity::empty(2);

    client
        .execute(INSERT_SQL, bind_insert(&entity).unwrap())
        .await
        .unwrap();
    let response = echo_insert(&in_memory_test_driver);
    let row = QueryResult::from_raw(response).single_row().unwrap();

    let result = map_row(&row).unwrap();
    assert_eq!(result, entity);
}

#[tokio::test]
async fn test_boolean_false_and_partial_values() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);
    let entity = TestEntity {
        name: Some("Partial Test".to_string()),
        age: Some(25),
        amount: Some(Decimal::new(99_999, 2)),
        active: Some(false),
        ..TestEntity::empty(3)
    };

    client
        .execute(INSERT_SQL, bind_insert(&entity).unwrap())
        .await
        .unwrap();
    let row = QueryResult::from_raw(echo_insert(&in_memory_test_driver))
        .single_row()
        .unwrap();

    let result = map_row(&row).unwrap();
    assert_eq!(result.active, Some(false));
    assert_eq!(result.salary, None);
    assert_eq!(result.birth_date, None);
    assert_eq!(result, entity);
}

#[tokio::test]
async fn test_call_reads_output_parameters() {
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["total", "last_seen", "checked_on", "note"])
                .row(vec![
                    SqlValue::Decimal(Decimal::new(1_000, 1)),
                    SqlValue::Timestamp(Utc.with_ymd_and_hms(2024, 6, 30, 3, 0, 0).unwrap()),
                    SqlValue::Null(SqlType::Date),
                    SqlValue::Null(SqlType::VarChar),
                ])
                .build(),
        ),
    );
    let client = client_for(&in_memory_test_driver);

    let mut params = ParameterBuffer::new();
    params.set_int(1, 7).unwrap();
    for index in 2..=5 {
        params.set_null(index, SqlType::Other).unwrap();
    }
    let out = client
        .call("CALL account_summary($1, $2, $3, $4, $5)", params)
        .await
        .unwrap();

    assert_eq!(
        OptionalTypeHandler::<Decimal>::new().get_output(&out, 1).unwrap(),
        Some(Decimal::new(100, 0))
    );
    assert_eq!(
        OptionalTimestampTypeHandler::new().get_output(&out, 2).unwrap(),
        Some(
            FixedOffset::east_opt(9 * 3600)
                .unwrap()
                .with_ymd_and_hms(2024, 6, 30, 12, 0, 0)
                .unwrap()
        )
    );
    assert_eq!(OptionalDateTypeHandler.get_output(&out, 3).unwrap(), None);
    assert_eq!(
        OptionalTypeHandler::<String>::new().get_output(&out, 4).unwrap(),
        None
    );
}

#[tokio::test]
async fn test_call_without_single_row_fails() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);

    let err = client
        .call("CALL noop()", ParameterBuffer::new())
        .await
        .unwrap_err();

    match err {
        OptColError::UnexpectedRowCount { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        other => panic!("Expected UnexpectedRowCount error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unbound_parameter_is_not_executed() {
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let client = client_for(&in_memory_test_driver);

    let mut params = ParameterBuffer::new();
    params.set_int(2, 1).unwrap();
    let err = client.execute(SELECT_SQL, params).await.unwrap_err();

    assert!(matches!(err, OptColError::UnboundParameter(1)));
    in_memory_test_driver.assert_query_count(0);
}

#[test]
fn test_unsupported_declared_type_fails_before_execution() {
    let mut params = ParameterBuffer::new();
    let err = OptionalTypeHandler::<String>::new()
        .set_parameter(&mut params, 1, &None, SqlType::Blob)
        .unwrap_err();

    assert!(matches!(err, OptColError::UnsupportedSqlType(SqlType::Blob)));
    assert!(params.is_empty());
}

#[tokio::test]
async fn test_multiple_queries_use_queued_responses() {
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new()
            .with_response(
                InMemoryTestResponseBuilder::new()
                    .columns(&["age"])
                    .row(vec![SqlValue::Int32(41)])
                    .build(),
            )
            .with_response(
                InMemoryTestResponseBuilder::new()
                    .columns(&["age"])
                    .row(vec![SqlValue::Null(SqlType::Integer)])
                    .build(),
            ),
    );
    let client = client_for(&in_memory_test_driver);
    let handler = OptionalTypeHandler::<i32>::new();

    let first = client
        .execute("SELECT age FROM test_entity WHERE id = $1", bind_id(1).unwrap())
        .await
        .unwrap()
        .single_row()
        .unwrap();
    let second = client
        .execute("SELECT age FROM test_entity WHERE id = $1", bind_id(2).unwrap())
        .await
        .unwrap()
        .single_row()
        .unwrap();

    in_memory_test_driver.assert_query_count(2);
    let queries = in_memory_test_driver.recorded_queries();
    assert_eq!(queries[0].params, vec![SqlValue::Int32(1)]);
    assert_eq!(queries[1].params, vec![SqlValue::Int32(2)]);

    assert_eq!(handler.get_result_by_name(&first, "AGE").unwrap(), Some(41));
    assert_eq!(handler.get_result_by_name(&second, "age").unwrap(), None);
}
