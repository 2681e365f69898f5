// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock metadata source for testing
//!
//! Provides an in-memory catalog with a builder API and YAML loading. The mock
//! counts every query, tracks how many row streams are still open and can be
//! told to fail a query kind on demand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dbfixture_catalog::{
    CatalogError, CatalogResult, ColumnRow, MetadataSource, PrimaryKeyRow, RowStream, TableRow,
    like_match,
};
use dbfixture_types::Nullable;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PRODUCT_NAME: &str = "MockDB";

/// Query kinds of a [`MetadataSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockQuery {
    ProductName,
    Columns,
    Tables,
    PrimaryKeys,
}

/// How an injected failure surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The query call itself returns an error
    Query,
    /// The query succeeds but the stream yields an error before any row
    Row,
}

/// Error loading a mock catalog
#[derive(Debug, Error)]
pub enum MockSourceError {
    #[error("Invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Default)]
struct QueryStats {
    product_name: AtomicUsize,
    columns: AtomicUsize,
    tables: AtomicUsize,
    primary_keys: AtomicUsize,
    streams_opened: AtomicUsize,
    open_streams: AtomicIsize,
}

impl QueryStats {
    fn counter(&self, query: MockQuery) -> &AtomicUsize {
        match query {
            MockQuery::ProductName => &self.product_name,
            MockQuery::Columns => &self.columns,
            MockQuery::Tables => &self.tables,
            MockQuery::PrimaryKeys => &self.primary_keys,
        }
    }
}

/// Row stream that reports its release back to the owning mock
struct TrackedStream<R> {
    rows: std::vec::IntoIter<CatalogResult<R>>,
    stats: Arc<QueryStats>,
}

impl<R> Iterator for TrackedStream<R> {
    type Item = CatalogResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl<R> Drop for TrackedStream<R> {
    fn drop(&mut self) {
        self.stats.open_streams.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One table of a mock catalog
#[derive(Debug, Clone)]
pub struct MockTable {
    catalog: Option<String>,
    schema: Option<String>,
    name: String,
    table_type: String,
    columns: Vec<ColumnRow>,
    primary_key: Vec<String>,
}

impl MockTable {
    /// Create a `TABLE` in `schema`
    pub fn new(schema: Option<&str>, name: &str) -> Self {
        Self {
            catalog: None,
            schema: schema.map(str::to_string),
            name: name.to_string(),
            table_type: "TABLE".to_string(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Place the table in a catalog (MySQL reports databases here)
    pub fn in_catalog(mut self, catalog: &str) -> Self {
        self.catalog = Some(catalog.to_string());
        self
    }

    pub fn with_type(mut self, table_type: &str) -> Self {
        self.table_type = table_type.to_string();
        self
    }

    /// Add a nullable column
    pub fn column(self, name: &str, type_name: &str) -> Self {
        self.column_row(ColumnRow {
            column_name: name.to_string(),
            type_name: type_name.to_string(),
            nullable: Nullable::Nullable,
            ..ColumnRow::default()
        })
    }

    /// Add a `NOT NULL` column
    pub fn required_column(self, name: &str, type_name: &str) -> Self {
        self.column_row(ColumnRow {
            column_name: name.to_string(),
            type_name: type_name.to_string(),
            nullable: Nullable::NoNulls,
            ..ColumnRow::default()
        })
    }

    /// Add a fully specified column; table location fields are overwritten
    pub fn column_row(mut self, row: ColumnRow) -> Self {
        self.columns.push(row);
        self
    }

    /// Set the primary key columns in key order
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// In-memory metadata source for testing
#[derive(Debug, Default)]
pub struct MockMetadataSource {
    product_name: Option<String>,
    tables: Vec<TableRow>,
    columns: Vec<ColumnRow>,
    primary_keys: Vec<PrimaryKeyRow>,
    failures: Mutex<HashMap<MockQuery, MockFailure>>,
    stats: Arc<QueryStats>,
}

impl MockMetadataSource {
    /// Create an empty mock catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mock catalog from YAML
    ///
    /// ```yaml
    /// product_name: MySQL
    /// tables:
    ///   - catalog: shop
    ///     name: USERS
    ///     columns:
    ///       - { name: ID, type: BIGINT, nullable: false }
    ///       - { name: EMAIL, type: "varchar(255)", size: 255 }
    ///     primary_key: [ID]
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, MockSourceError> {
        let catalog: YamlCatalog = serde_yaml::from_str(yaml)?;

        let mut source = Self::new();
        source.product_name = catalog.product_name;
        for table in catalog.tables {
            source = source.with_table(table.into_mock_table());
        }
        Ok(source)
    }

    pub fn with_product_name(mut self, name: &str) -> Self {
        self.product_name = Some(name.to_string());
        self
    }

    /// Add a table with its columns and primary key
    pub fn with_table(mut self, table: MockTable) -> Self {
        let MockTable {
            catalog,
            schema,
            name,
            table_type,
            columns,
            primary_key,
        } = table;

        for row in columns {
            self.columns.push(ColumnRow {
                table_cat: catalog.clone(),
                table_schem: schema.clone(),
                table_name: name.clone(),
                ..row
            });
        }

        for (position, column) in primary_key.into_iter().enumerate() {
            self.primary_keys.push(PrimaryKeyRow {
                table_cat: catalog.clone(),
                table_schem: schema.clone(),
                table_name: name.clone(),
                column_name: column,
                key_seq: position as i32 + 1,
            });
        }

        self.tables.push(TableRow {
            table_cat: catalog,
            table_schem: schema,
            table_name: name,
            table_type,
        });
        self
    }

    /// Add a raw primary key row, e.g. to control catalog order
    pub fn with_primary_key_row(mut self, row: PrimaryKeyRow) -> Self {
        self.primary_keys.push(row);
        self
    }

    /// Fail every future `query` in the given way
    pub fn with_failure(self, query: MockQuery, failure: MockFailure) -> Self {
        self.fail(query, failure);
        self
    }

    /// Fail every future `query` in the given way
    pub fn fail(&self, query: MockQuery, failure: MockFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query, failure);
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of calls made for `query`, failed ones included
    pub fn query_count(&self, query: MockQuery) -> usize {
        self.stats.counter(query).load(Ordering::SeqCst)
    }

    pub fn column_queries(&self) -> usize {
        self.query_count(MockQuery::Columns)
    }

    pub fn table_queries(&self) -> usize {
        self.query_count(MockQuery::Tables)
    }

    pub fn primary_key_queries(&self) -> usize {
        self.query_count(MockQuery::PrimaryKeys)
    }

    /// Number of row streams handed out so far
    pub fn streams_opened(&self) -> usize {
        self.stats.streams_opened.load(Ordering::SeqCst)
    }

    /// Number of row streams not yet dropped
    pub fn open_streams(&self) -> isize {
        self.stats.open_streams.load(Ordering::SeqCst)
    }

    fn record(&self, query: MockQuery) -> Option<MockFailure> {
        self.stats.counter(query).fetch_add(1, Ordering::SeqCst);
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&query)
            .copied()
    }

    fn stream<R: 'static>(
        &self,
        query: MockQuery,
        rows: Vec<R>,
    ) -> CatalogResult<RowStream<'_, R>> {
        let rows = match self.record(query) {
            Some(MockFailure::Query) => {
                return Err(CatalogError::QueryFailed(format!(
                    "injected {:?} query failure",
                    query
                )));
            }
            Some(MockFailure::Row) => vec![Err(CatalogError::QueryFailed(format!(
                "injected {:?} row failure",
                query
            )))],
            None => rows.into_iter().map(Ok).collect(),
        };

        self.stats.streams_opened.fetch_add(1, Ordering::SeqCst);
        self.stats.open_streams.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedStream {
            rows: rows.into_iter(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

fn matches_exact(expected: Option<&str>, actual: Option<&str>) -> bool {
    expected.is_none_or(|expected| actual == Some(expected))
}

fn matches_pattern(pattern: Option<&str>, actual: Option<&str>) -> bool {
    pattern.is_none_or(|pattern| like_match(pattern, actual.unwrap_or("")))
}

impl MetadataSource for MockMetadataSource {
    fn database_product_name(&self) -> CatalogResult<String> {
        if self.record(MockQuery::ProductName).is_some() {
            return Err(CatalogError::QueryFailed(
                "injected product name failure".to_string(),
            ));
        }
        Ok(self
            .product_name
            .clone()
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()))
    }

    fn columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        column_pattern: Option<&str>,
    ) -> CatalogResult<RowStream<'_, ColumnRow>> {
        let rows = self
            .columns
            .iter()
            .filter(|row| {
                matches_exact(catalog, row.table_cat.as_deref())
                    && matches_pattern(schema_pattern, row.table_schem.as_deref())
                    && like_match(table_pattern, &row.table_name)
                    && matches_pattern(column_pattern, Some(&row.column_name))
            })
            .cloned()
            .collect();
        self.stream(MockQuery::Columns, rows)
    }

    fn tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        types: Option<&[String]>,
    ) -> CatalogResult<RowStream<'_, TableRow>> {
        let rows = self
            .tables
            .iter()
            .filter(|row| {
                matches_exact(catalog, row.table_cat.as_deref())
                    && matches_pattern(schema_pattern, row.table_schem.as_deref())
                    && like_match(table_pattern, &row.table_name)
                    && types.is_none_or(|types| {
                        types.iter().any(|t| t.eq_ignore_ascii_case(&row.table_type))
                    })
            })
            .cloned()
            .collect();
        self.stream(MockQuery::Tables, rows)
    }

    fn primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'_, PrimaryKeyRow>> {
        let rows = self
            .primary_keys
            .iter()
            .filter(|row| {
                matches_exact(catalog, row.table_cat.as_deref())
                    && matches_exact(schema, row.table_schem.as_deref())
                    && row.table_name == table
            })
            .cloned()
            .collect();
        self.stream(MockQuery::PrimaryKeys, rows)
    }
}

#[derive(Debug, Deserialize)]
struct YamlCatalog {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    tables: Vec<YamlTable>,
}

#[derive(Debug, Deserialize)]
struct YamlTable {
    #[serde(default)]
    catalog: Option<String>,
    #[serde(default)]
    schema: Option<String>,
    name: String,
    #[serde(rename = "type", default = "default_table_type")]
    table_type: String,
    #[serde(default)]
    columns: Vec<YamlColumn>,
    #[serde(default)]
    primary_key: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct YamlColumn {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    size: Option<u32>,
    #[serde(default)]
    nullable: Option<bool>,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    remarks: Option<String>,
    #[serde(default)]
    auto_increment: Option<bool>,
}

fn default_table_type() -> String {
    "TABLE".to_string()
}

impl YamlTable {
    fn into_mock_table(self) -> MockTable {
        let mut table = MockTable::new(self.schema.as_deref(), &self.name).with_type(&self.table_type);
        table.catalog = self.catalog;
        table.primary_key = self.primary_key;

        for column in self.columns {
            let nullable = match column.nullable {
                Some(true) => Nullable::Nullable,
                Some(false) => Nullable::NoNulls,
                None => Nullable::Unknown,
            };
            table = table.column_row(ColumnRow {
                column_name: column.name,
                type_name: column.type_name,
                column_size: column.size,
                nullable,
                column_def: column.default,
                remarks: column.remarks,
                is_autoincrement: column.auto_increment,
                ..ColumnRow::default()
            });
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> MockMetadataSource {
        MockMetadataSource::new().with_table(
            MockTable::new(Some("APP"), "USERS")
                .required_column("ID", "BIGINT")
                .column("EMAIL", "VARCHAR")
                .primary_key(&["ID"]),
        )
    }

    #[test]
    fn test_columns_filtered_by_pattern() {
        let source = users();

        let rows: Vec<ColumnRow> = source
            .columns(None, Some("APP"), "USERS", Some("E%"))
            .unwrap()
            .collect::<CatalogResult<_>>()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column_name, "EMAIL");
        assert_eq!(rows[0].table_schem.as_deref(), Some("APP"));
        assert_eq!(source.column_queries(), 1);
    }

    #[test]
    fn test_stream_release_is_tracked() {
        let source = users();

        let stream = source.tables(None, None, "%", None).unwrap();
        assert_eq!(source.open_streams(), 1);
        drop(stream);
        assert_eq!(source.open_streams(), 0);
        assert_eq!(source.streams_opened(), 1);
    }

    #[test]
    fn test_injected_failures() {
        let source = users().with_failure(MockQuery::Columns, MockFailure::Query);
        assert!(source.columns(None, None, "USERS", None).is_err());
        assert_eq!(source.open_streams(), 0);

        source.fail(MockQuery::Columns, MockFailure::Row);
        let mut stream = source.columns(None, None, "USERS", None).unwrap();
        assert!(matches!(stream.next(), Some(Err(CatalogError::QueryFailed(_)))));
        drop(stream);

        source.clear_failures();
        assert!(source.columns(None, None, "USERS", None).is_ok());
        assert_eq!(source.column_queries(), 3);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
product_name: MySQL
tables:
  - catalog: shop
    name: USERS
    columns:
      - { name: ID, type: BIGINT, nullable: false }
      - { name: EMAIL, type: "varchar(255)", size: 255 }
    primary_key: [ID]
  - catalog: shop
    name: ACTIVE_USERS
    type: VIEW
"#;
        let source = MockMetadataSource::from_yaml(yaml).unwrap();
        assert_eq!(source.database_product_name().unwrap(), "MySQL");

        let types = vec!["TABLE".to_string()];
        let tables: Vec<TableRow> = source
            .tables(Some("shop"), None, "%", Some(&types))
            .unwrap()
            .collect::<CatalogResult<_>>()
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table_name, "USERS");

        let keys: Vec<PrimaryKeyRow> = source
            .primary_keys(Some("shop"), None, "USERS")
            .unwrap()
            .collect::<CatalogResult<_>>()
            .unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_seq, 1);
    }

    #[test]
    fn test_from_yaml_rejects_invalid_document() {
        assert!(MockMetadataSource::from_yaml("tables: [{ columns: 3 }]").is_err());
    }
}
