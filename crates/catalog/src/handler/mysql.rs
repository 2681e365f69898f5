// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use tracing::debug;

use super::{MetadataHandler, equal_ignore_null, has_rows};
use crate::error::CatalogResult;
use crate::r#trait::{MetadataSource, RowStream};
use crate::row::{CatalogRow, ColumnRow, PrimaryKeyRow, TableRow};

/// Handler for MySQL, where a database is reported as the catalog
///
/// The namespace is passed in catalog position and matched against the
/// row's catalog field. When a row has no schema the catalog stands in for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlMetadataHandler;

impl MySqlMetadataHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataHandler for MySqlMetadataHandler {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn get_columns<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, ColumnRow>> {
        source.columns(schema, None, table, None)
    }

    fn matches(
        &self,
        row: &ColumnRow,
        schema: Option<&str>,
        table: Option<&str>,
        column: Option<&str>,
    ) -> bool {
        equal_ignore_null(schema, row.table_cat())
            && equal_ignore_null(table, Some(row.table_name()))
            && equal_ignore_null(column, Some(&row.column_name))
    }

    fn schema_name(&self, row: &dyn CatalogRow) -> Option<String> {
        match (row.table_schem(), row.table_cat()) {
            (Some(schema), _) => Some(schema.to_string()),
            (None, Some(catalog)) => {
                debug!(
                    "Using catalog '{}' as schema since the schema is not set",
                    catalog
                );
                Some(catalog.to_string())
            }
            (None, None) => None,
        }
    }

    fn table_exists(
        &self,
        source: &dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<bool> {
        has_rows(source.tables(schema, None, table, None)?)
    }

    fn get_tables<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table_types: &[String],
    ) -> CatalogResult<RowStream<'s, TableRow>> {
        source.tables(schema, None, "%", Some(table_types))
    }

    fn get_primary_keys<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, PrimaryKeyRow>> {
        source.primary_keys(schema, None, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_row(catalog: Option<&str>, schema: Option<&str>) -> TableRow {
        TableRow {
            table_cat: catalog.map(str::to_string),
            table_schem: schema.map(str::to_string),
            table_name: "orders".to_string(),
            table_type: "TABLE".to_string(),
        }
    }

    #[test]
    fn test_schema_name_falls_back_to_catalog() {
        let handler = MySqlMetadataHandler;
        assert_eq!(
            handler.schema_name(&table_row(Some("shop"), None)),
            Some("shop".to_string())
        );
        assert_eq!(
            handler.schema_name(&table_row(Some("shop"), Some("other"))),
            Some("other".to_string())
        );
        assert_eq!(handler.schema_name(&table_row(None, None)), None);
    }

    #[test]
    fn test_matches_against_catalog() {
        let handler = MySqlMetadataHandler;
        let row = ColumnRow {
            table_cat: Some("shop".to_string()),
            table_schem: None,
            table_name: "orders".to_string(),
            column_name: "id".to_string(),
            ..Default::default()
        };
        assert!(handler.matches(&row, Some("shop"), Some("orders"), None));
        assert!(!handler.matches(&row, Some("SHOP"), Some("orders"), None));
        assert!(!handler.matches(&row, Some("shop"), Some("order"), None));
    }
}
