// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata source trait
//!
//! This module defines the synchronous query surface over a live database
//! catalog. Implementations may use `%`/`_` pattern matching for the pattern
//! arguments, so callers must filter the rows they get back.

use std::fmt;

use crate::error::CatalogResult;
use crate::row::{ColumnRow, PrimaryKeyRow, TableRow};

/// One-pass sequence of catalog rows
///
/// Dropping the stream releases whatever handle backs it.
pub type RowStream<'a, R> = Box<dyn Iterator<Item = CatalogResult<R>> + 'a>;

/// Catalog query surface of one database connection
///
/// Every call blocks the calling thread until the catalog answers. Only one
/// query is expected to be open per call.
///
/// # Examples
///
/// ```rust,ignore
/// use dbfixture_catalog::MetadataSource;
///
/// fn print_tables(source: &dyn MetadataSource) -> dbfixture_catalog::CatalogResult<()> {
///     for row in source.tables(None, Some("app"), "%", None)? {
///         println!("{}", row?.table_name);
///     }
///     Ok(())
/// }
/// ```
pub trait MetadataSource: Send + Sync + fmt::Debug {
    /// Product name reported by the database (e.g. `"MySQL"`)
    fn database_product_name(&self) -> CatalogResult<String>;

    /// Column descriptions
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the catalog query fails.
    fn columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        column_pattern: Option<&str>,
    ) -> CatalogResult<RowStream<'_, ColumnRow>>;

    /// Table descriptions, optionally restricted to `types` (e.g. `["TABLE"]`)
    fn tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        types: Option<&[String]>,
    ) -> CatalogResult<RowStream<'_, TableRow>>;

    /// Primary key columns of one table, in catalog order
    fn primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<RowStream<'_, PrimaryKeyRow>>;
}

/// Stream over rows that are already in memory
pub fn row_stream<'a, R: 'a>(rows: Vec<R>) -> RowStream<'a, R> {
    Box::new(rows.into_iter().map(Ok))
}

/// `LIKE`-style match with `%` (any run) and `_` (any single character)
///
/// Live sources push patterns down to the database; this is for sources that
/// evaluate them in memory.
pub fn like_match(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let value: Vec<char> = value.chars().collect();

    let (mut p, mut v) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == value[v]) {
            p += 1;
            v += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, v));
            p += 1;
        } else if let Some((bp, bv)) = backtrack {
            p = bp + 1;
            v = bv + 1;
            backtrack = Some((bp, bv + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_match_literal() {
        assert!(like_match("USERS", "USERS"));
        assert!(!like_match("USERS", "USERS2"));
    }

    #[test]
    fn test_like_match_underscore() {
        assert!(like_match("USER_ROLE", "USER_ROLE"));
        assert!(like_match("USER_ROLE", "USERXROLE"));
        assert!(!like_match("USER_ROLE", "USER__ROLE"));
    }

    #[test]
    fn test_like_match_percent() {
        assert!(like_match("%", ""));
        assert!(like_match("%", "ANYTHING"));
        assert!(like_match("US%S", "USERS"));
        assert!(like_match("%ERS", "USERS"));
        assert!(!like_match("%ERX", "USERS"));
    }
}
