// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use tracing::trace;

use super::{MetadataHandler, equal_ignore_null, has_rows};
use crate::error::CatalogResult;
use crate::r#trait::{MetadataSource, RowStream};
use crate::row::{CatalogRow, ColumnRow, PrimaryKeyRow, TableRow};

/// Handler for engines that report the table namespace as the schema
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetadataHandler;

impl DefaultMetadataHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataHandler for DefaultMetadataHandler {
    fn name(&self) -> &'static str {
        "default"
    }

    fn get_columns<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, ColumnRow>> {
        source.columns(None, schema, table, None)
    }

    fn matches(
        &self,
        row: &ColumnRow,
        schema: Option<&str>,
        table: Option<&str>,
        column: Option<&str>,
    ) -> bool {
        equal_ignore_null(schema, row.table_schem())
            && equal_ignore_null(table, Some(row.table_name()))
            && equal_ignore_null(column, Some(&row.column_name))
    }

    fn schema_name(&self, row: &dyn CatalogRow) -> Option<String> {
        row.table_schem().map(str::to_string)
    }

    fn table_exists(
        &self,
        source: &dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<bool> {
        has_rows(source.tables(None, schema, table, None)?)
    }

    fn get_tables<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table_types: &[String],
    ) -> CatalogResult<RowStream<'s, TableRow>> {
        trace!(
            "get_tables(schema={:?}, table_types={:?})",
            schema, table_types
        );
        source.tables(None, schema, "%", Some(table_types))
    }

    fn get_primary_keys<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, PrimaryKeyRow>> {
        source.primary_keys(None, schema, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(catalog: Option<&str>, schema: Option<&str>, table: &str, column: &str) -> ColumnRow {
        ColumnRow {
            table_cat: catalog.map(str::to_string),
            table_schem: schema.map(str::to_string),
            table_name: table.to_string(),
            column_name: column.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_exact_schema_and_table() {
        let handler = DefaultMetadataHandler;
        let row = row(None, Some("DB"), "T1", "ID");
        assert!(handler.matches(&row, Some("DB"), Some("T1"), None));
        assert!(!handler.matches(&row, Some("db"), Some("T1"), None));
        assert!(!handler.matches(&row, Some("DB"), Some("t1"), None));
        assert!(!handler.matches(&row, Some("DB"), Some("T"), None));
    }

    #[test]
    fn test_matches_none_is_wildcard() {
        let handler = DefaultMetadataHandler;
        let row = row(None, Some("DB"), "T1", "ID");
        assert!(handler.matches(&row, None, Some("T1"), None));
        assert!(handler.matches(&row, None, None, None));
        assert!(handler.matches(&row, None, None, Some("ID")));
        assert!(!handler.matches(&row, None, None, Some("NAME")));
    }

    #[test]
    fn test_matches_ignores_catalog() {
        let handler = DefaultMetadataHandler;
        let row = row(Some("DB"), None, "T1", "ID");
        assert!(!handler.matches(&row, Some("DB"), Some("T1"), None));
    }

    #[test]
    fn test_schema_name_is_schema_field() {
        let handler = DefaultMetadataHandler;
        let table = TableRow {
            table_cat: Some("CAT".to_string()),
            table_schem: None,
            table_name: "T1".to_string(),
            table_type: "TABLE".to_string(),
        };
        assert_eq!(handler.schema_name(&table), None);
    }
}
