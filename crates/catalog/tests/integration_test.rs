// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the catalog crate
//!
//! Every test runs the metadata layer against an in-memory catalog and checks
//! both the resolved metadata and the queries it took to get there.

use std::sync::Arc;

use dbfixture_catalog::{
    CatalogError, ColumnFilter, DataType, DatabaseConfig, DatabaseConnection,
    DatabaseTableMetadata, MySqlDataTypeFactory, MySqlMetadataHandler, PatternColumnFilter,
    PrimaryKeyRow, ResolutionState,
};
use dbfixture_test_utils::{
    CatalogFixtures, MockFailure, MockMetadataSource, MockQuery, MockTable, init_test_logging,
};

fn shop() -> Arc<MockMetadataSource> {
    init_test_logging();
    Arc::new(
        MockMetadataSource::from_yaml(CatalogFixtures::shop_schema())
            .expect("Failed to load shop schema"),
    )
}

fn connect(source: &Arc<MockMetadataSource>, schema: Option<&str>) -> Arc<DatabaseConnection> {
    Arc::new(DatabaseConnection::new(source.clone(), schema))
}

fn names(columns: &[dbfixture_catalog::Column]) -> Vec<&str> {
    columns.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_columns_are_resolved_once() {
    let source = shop();
    let mut users = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();
    assert_eq!(users.resolution_state(), ResolutionState::Uninitialized);

    let first = users.columns().unwrap();
    let second = users.columns().unwrap();

    assert_eq!(names(&first), vec!["ID", "NAME", "EMAIL"]);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.column_queries(), 1);
    assert_eq!(users.resolution_state(), ResolutionState::ColumnsResolved);

    let id = &first[0];
    assert_eq!(id.data_type, DataType::BigInt);
    assert_eq!(id.auto_increment, Some(true));
    assert_eq!(first[2].data_type, DataType::Varchar(Some(255)));
}

#[test]
fn test_pattern_matches_from_other_tables_are_skipped() {
    let source = shop();
    let mut user_role =
        DatabaseTableMetadata::new("USER_ROLE", connect(&source, Some("APP"))).unwrap();

    // `_` matches any character, so USERXROLE comes back from the catalog too
    let columns = user_role.columns().unwrap();
    assert_eq!(names(&columns), vec!["USER_ID", "ROLE"]);
}

#[test]
fn test_qualified_table_name_overrides_connection_schema() {
    let source = shop();
    let mut orders = DatabaseTableMetadata::new("APP.ORDERS", connect(&source, None)).unwrap();

    assert_eq!(orders.qualified_table_name().schema(), Some("APP"));
    assert_eq!(orders.columns().unwrap().len(), 4);
    assert_eq!(names(&orders.primary_keys().unwrap()), vec!["ID"]);
}

#[test]
fn test_primary_keys_follow_key_sequence() {
    let source = Arc::new(
        MockMetadataSource::new()
            .with_table(
                MockTable::new(Some("APP"), "PAIRS")
                    .column("A", "INTEGER")
                    .column("B", "INTEGER")
                    .column("C", "INTEGER"),
            )
            .with_primary_key_row(PrimaryKeyRow {
                table_schem: Some("APP".to_string()),
                table_name: "PAIRS".to_string(),
                column_name: "B".to_string(),
                key_seq: 2,
                ..PrimaryKeyRow::default()
            })
            .with_primary_key_row(PrimaryKeyRow {
                table_schem: Some("APP".to_string()),
                table_name: "PAIRS".to_string(),
                column_name: "a".to_string(),
                key_seq: 1,
                ..PrimaryKeyRow::default()
            })
            .with_primary_key_row(PrimaryKeyRow {
                table_schem: Some("APP".to_string()),
                table_name: "PAIRS".to_string(),
                column_name: "GHOST".to_string(),
                key_seq: 3,
                ..PrimaryKeyRow::default()
            }),
    );
    let mut pairs = DatabaseTableMetadata::new("PAIRS", connect(&source, Some("APP"))).unwrap();

    let keys = pairs.primary_keys().unwrap();
    assert_eq!(names(&keys), vec!["A", "B"]);
    assert_eq!(pairs.resolution_state(), ResolutionState::PrimaryKeysResolved);

    let again = pairs.primary_keys().unwrap();
    assert!(Arc::ptr_eq(&keys, &again));
    assert_eq!(source.primary_key_queries(), 1);
}

#[test]
fn test_primary_key_ties_keep_catalog_order() {
    let key = |column: &str, key_seq: i32| PrimaryKeyRow {
        table_schem: Some("APP".to_string()),
        table_name: "PAIRS".to_string(),
        column_name: column.to_string(),
        key_seq,
        ..PrimaryKeyRow::default()
    };
    let source = Arc::new(
        MockMetadataSource::new()
            .with_table(
                MockTable::new(Some("APP"), "PAIRS")
                    .column("A", "INTEGER")
                    .column("B", "INTEGER")
                    .column("C", "INTEGER"),
            )
            .with_primary_key_row(key("C", 1))
            .with_primary_key_row(key("A", 1))
            .with_primary_key_row(key("B", 0)),
    );
    let mut pairs = DatabaseTableMetadata::new("PAIRS", connect(&source, Some("APP"))).unwrap();

    assert_eq!(names(&pairs.primary_keys().unwrap()), vec!["B", "C", "A"]);
}

#[test]
fn test_composite_primary_key() {
    let source = shop();
    let mut items =
        DatabaseTableMetadata::new("ORDER_ITEMS", connect(&source, Some("APP"))).unwrap();

    assert_eq!(
        names(&items.primary_keys().unwrap()),
        vec!["ORDER_ID", "LINE_NO"]
    );
}

#[test]
fn test_primary_key_filter_overrides_catalog() {
    let source = shop();
    let connection = connect(&source, Some("APP"));
    let mut users = DatabaseTableMetadata::new("USERS", connection.clone()).unwrap();

    assert_eq!(names(&users.primary_keys().unwrap()), vec!["ID"]);
    assert_eq!(source.primary_key_queries(), 1);

    let email: Arc<dyn ColumnFilter> = Arc::new(PatternColumnFilter::columns(["EMAIL"]));
    connection.update_config(|config| config.primary_key_filter = Some(email.clone()));
    let by_filter = users.primary_keys().unwrap();
    assert_eq!(names(&by_filter), vec!["EMAIL"]);

    // same filter instance, cached keys
    connection.update_config(|config| config.primary_key_filter = Some(email.clone()));
    assert!(Arc::ptr_eq(&by_filter, &users.primary_keys().unwrap()));

    // equal but distinct instance, re-derived
    connection.update_config(|config| {
        config.primary_key_filter = Some(Arc::new(PatternColumnFilter::columns(["NAME"])))
    });
    assert_eq!(names(&users.primary_keys().unwrap()), vec!["NAME"]);

    connection.update_config(|config| config.primary_key_filter = None);
    assert_eq!(names(&users.primary_keys().unwrap()), vec!["ID"]);

    assert_eq!(source.primary_key_queries(), 2);
    assert_eq!(source.column_queries(), 1);
}

#[test]
fn test_column_index() {
    let source = shop();
    let mut users = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();

    assert_eq!(users.column_index("ID").unwrap(), 0);
    assert_eq!(users.column_index("NAME").unwrap(), 1);
    assert_eq!(users.column_index("EMAIL").unwrap(), 2);
    assert_eq!(source.column_queries(), 1);

    match users.column_index("UNKNOWN") {
        Err(CatalogError::NoSuchColumn {
            table,
            column,
            available,
        }) => {
            assert_eq!(table, "USERS");
            assert_eq!(column, "UNKNOWN");
            assert_eq!(available, vec!["ID", "NAME", "EMAIL"]);
        }
        other => panic!("Expected NoSuchColumn, got {:?}", other),
    }

    assert!(matches!(
        users.column_index("name"),
        Err(CatalogError::NoSuchColumn { .. })
    ));
}

#[test]
fn test_column_index_without_columns() {
    let source = Arc::new(MockMetadataSource::new().with_table(MockTable::new(Some("APP"), "EMPTY")));
    let mut empty = DatabaseTableMetadata::new("EMPTY", connect(&source, Some("APP"))).unwrap();

    assert!(empty.columns().unwrap().is_empty());
    assert!(matches!(
        empty.column_index("ID"),
        Err(CatalogError::IllegalState(_))
    ));
}

#[test]
fn test_query_failure_is_wrapped() {
    let source = Arc::new(
        MockMetadataSource::from_yaml(CatalogFixtures::shop_schema())
            .unwrap()
            .with_failure(MockQuery::Columns, MockFailure::Query),
    );
    let mut users = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();

    match users.columns() {
        Err(CatalogError::MetadataQueryFailure {
            schema,
            table,
            source: cause,
        }) => {
            assert_eq!(schema.as_deref(), Some("APP"));
            assert_eq!(table, "USERS");
            assert!(matches!(*cause, CatalogError::QueryFailed(_)));
        }
        other => panic!("Expected MetadataQueryFailure, got {:?}", other),
    }
    assert_eq!(users.resolution_state(), ResolutionState::Uninitialized);

    source.clear_failures();
    assert_eq!(users.columns().unwrap().len(), 3);
}

#[test]
fn test_streams_are_released() {
    let source = shop();
    let mut users = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();
    users.primary_keys().unwrap();
    assert_eq!(source.streams_opened(), 2);
    assert_eq!(source.open_streams(), 0);

    source.fail(MockQuery::PrimaryKeys, MockFailure::Row);
    let mut orders = DatabaseTableMetadata::new("ORDERS", connect(&source, Some("APP"))).unwrap();
    assert!(matches!(
        orders.primary_keys(),
        Err(CatalogError::MetadataQueryFailure { .. })
    ));
    assert_eq!(source.streams_opened(), 4);
    assert_eq!(source.open_streams(), 0);

    // columns were resolved before the key query failed
    assert_eq!(orders.resolution_state(), ResolutionState::ColumnsResolved);

    source.clear_failures();
    source.fail(MockQuery::Columns, MockFailure::Row);
    let mut fresh = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();
    assert!(matches!(
        fresh.columns(),
        Err(CatalogError::MetadataQueryFailure { .. })
    ));
    assert_eq!(source.streams_opened(), 5);
    assert_eq!(source.open_streams(), 0);
    assert_eq!(fresh.resolution_state(), ResolutionState::Uninitialized);

    source.clear_failures();
    assert_eq!(fresh.columns().unwrap().len(), 3);
    assert_eq!(source.streams_opened(), 6);
    assert_eq!(source.open_streams(), 0);
}

#[test]
fn test_mysql_handler_uses_catalog_position() {
    init_test_logging();
    let source = Arc::new(MockMetadataSource::from_yaml(CatalogFixtures::mysql_shop()).unwrap());
    let config = DatabaseConfig::default()
        .with_metadata_handler(Arc::new(MySqlMetadataHandler))
        .with_datatype_factory(Arc::new(MySqlDataTypeFactory));
    let connection = Arc::new(DatabaseConnection::with_config(
        source.clone(),
        Some("shop"),
        config,
    ));

    let mut customers = DatabaseTableMetadata::new("customers", connection.clone()).unwrap();
    let columns = customers.columns().unwrap();
    assert_eq!(names(&columns), vec!["id", "active", "email"]);
    assert_eq!(columns[1].data_type, DataType::Boolean);
    assert_eq!(names(&customers.primary_keys().unwrap()), vec!["id"]);

    let mut invoices = DatabaseTableMetadata::new("invoices", connection).unwrap();
    let columns = invoices.columns().unwrap();
    assert!(matches!(columns[2].data_type, DataType::Other(_)));

    assert_eq!(source.query_count(MockQuery::ProductName), 2);
}

#[test]
fn test_default_handler_misses_catalog_positioned_tables() {
    let source = Arc::new(MockMetadataSource::from_yaml(CatalogFixtures::mysql_shop()).unwrap());
    let mut customers =
        DatabaseTableMetadata::new("customers", connect(&source, Some("shop"))).unwrap();

    assert!(customers.columns().unwrap().is_empty());
}

#[test]
fn test_mismatched_factory_still_resolves() {
    let source = shop();
    let connection = connect(&source, Some("APP"));
    connection.update_config(|config| config.datatype_factory = Arc::new(MySqlDataTypeFactory));

    let mut users = DatabaseTableMetadata::new("USERS", connection).unwrap();
    assert_eq!(users.columns().unwrap().len(), 3);
    assert_eq!(source.query_count(MockQuery::ProductName), 1);
}

#[test]
fn test_unknown_types_are_skipped() {
    let source = Arc::new(MockMetadataSource::from_yaml(CatalogFixtures::unknown_types()).unwrap());
    let connection = connect(&source, Some("APP"));

    let mut shapes = DatabaseTableMetadata::new("SHAPES", connection.clone()).unwrap();
    assert_eq!(names(&shapes.columns().unwrap()), vec!["ID", "LABEL"]);
    assert_eq!(shapes.column_index("LABEL").unwrap(), 1);

    connection.update_config(|config| config.datatype_warning = false);
    shapes.invalidate();
    assert_eq!(names(&shapes.columns().unwrap()), vec!["ID", "LABEL"]);
}

#[test]
fn test_escaped_table_name() {
    let source = shop();
    let connection = connect(&source, Some("APP"));
    let users = DatabaseTableMetadata::new("USERS", connection.clone()).unwrap();

    assert_eq!(users.escaped_table_name(), "USERS");

    connection.update_config(|config| config.escape_pattern = Some("[?]".to_string()));
    assert_eq!(users.escaped_table_name(), "[USERS]");

    connection.update_config(|config| config.qualified_table_names = true);
    assert_eq!(users.escaped_table_name(), "[APP].[USERS]");

    connection.update_config(|config| config.escape_pattern = None);
    assert_eq!(users.escaped_table_name(), "APP.USERS");
}

#[test]
fn test_invalidate_forces_new_query() {
    let source = shop();
    let mut users = DatabaseTableMetadata::new("USERS", connect(&source, Some("APP"))).unwrap();

    users.primary_keys().unwrap();
    users.invalidate();
    assert_eq!(users.resolution_state(), ResolutionState::Uninitialized);

    users.columns().unwrap();
    assert_eq!(source.column_queries(), 2);
}

#[test]
fn test_config_from_json() {
    let source = Arc::new(MockMetadataSource::from_yaml(CatalogFixtures::mysql_shop()).unwrap());
    let settings = serde_json::json!({
        "dbfixture": {
            "metadataHandler": "mysql",
            "datatypeFactory": "mysql",
            "qualifiedTableNames": true,
            "escapePattern": "`"
        }
    });
    let config = DatabaseConfig::from_json(&settings).unwrap();
    let connection = Arc::new(DatabaseConnection::with_config(
        source.clone(),
        Some("shop"),
        config,
    ));

    let mut customers = DatabaseTableMetadata::new("customers", connection).unwrap();
    assert_eq!(customers.columns().unwrap().len(), 3);
    assert_eq!(customers.escaped_table_name(), "`shop`.`customers`");
}
