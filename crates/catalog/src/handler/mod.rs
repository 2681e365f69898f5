// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata handlers
//!
//! Engines disagree on where a table's namespace lives in the catalog: most
//! report it as the schema, MySQL reports it as the catalog and leaves the
//! schema empty. A [`MetadataHandler`] hides that difference so the table
//! metadata resolver can stay engine-agnostic.
//!
//! A handler is selected once per configuration and held as
//! `Arc<dyn MetadataHandler>`. Swapping handlers does not invalidate metadata
//! that was resolved with the previous one.

mod default;
mod mysql;

pub use default::DefaultMetadataHandler;
pub use mysql::MySqlMetadataHandler;

use std::fmt;

use crate::error::CatalogResult;
use crate::r#trait::{MetadataSource, RowStream};
use crate::row::{CatalogRow, ColumnRow, PrimaryKeyRow, TableRow};

/// Engine-specific access to catalog metadata
pub trait MetadataHandler: Send + Sync + fmt::Debug {
    /// Short name used in configuration (`"default"`, `"mysql"`)
    fn name(&self) -> &'static str;

    /// Column rows for `table` in `schema`
    ///
    /// The source may match names as patterns; filter the result with
    /// [`MetadataHandler::matches`].
    fn get_columns<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, ColumnRow>>;

    /// Exact match of a column row against schema, table and column
    ///
    /// `None` (or empty) query values match anything.
    fn matches(
        &self,
        row: &ColumnRow,
        schema: Option<&str>,
        table: Option<&str>,
        column: Option<&str>,
    ) -> bool;

    /// Effective schema of a catalog row
    fn schema_name(&self, row: &dyn CatalogRow) -> Option<String>;

    /// Whether the catalog reports at least one table named `table`
    fn table_exists(
        &self,
        source: &dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<bool>;

    /// All tables of `schema` with one of `table_types`
    fn get_tables<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table_types: &[String],
    ) -> CatalogResult<RowStream<'s, TableRow>>;

    /// Primary key rows for `table` in `schema`
    fn get_primary_keys<'s>(
        &self,
        source: &'s dyn MetadataSource,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'s, PrimaryKeyRow>>;
}

/// Null-tolerant equality: a missing or empty `expected` matches anything
pub(crate) fn equal_ignore_null(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected {
        None | Some("") => true,
        Some(expected) => actual == Some(expected),
    }
}

/// Drain a table stream far enough to see whether it has a row
pub(crate) fn has_rows(mut rows: RowStream<'_, TableRow>) -> CatalogResult<bool> {
    rows.next().transpose().map(|row| row.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ignore_null() {
        assert!(equal_ignore_null(None, Some("DB")));
        assert!(equal_ignore_null(None, None));
        assert!(equal_ignore_null(Some(""), Some("DB")));
        assert!(equal_ignore_null(Some("DB"), Some("DB")));
        assert!(!equal_ignore_null(Some("DB"), Some("db")));
        assert!(!equal_ignore_null(Some("DB"), None));
    }
}
