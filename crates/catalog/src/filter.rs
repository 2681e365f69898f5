// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column filters
//!
//! A primary-key filter overrides catalog primary-key discovery: when one is
//! configured, the primary keys of a table are the resolved columns the filter
//! accepts.
//!
//! Filters are compared by identity (the `Arc` allocation), not by value. Two
//! separately built filters with the same patterns count as different filters.

use std::fmt;
use std::sync::Arc;

use dbfixture_types::Column;
use glob::{MatchOptions, Pattern};

use crate::error::{CatalogError, CatalogResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Predicate over the columns of a table
pub trait ColumnFilter: Send + Sync + fmt::Debug {
    fn accept(&self, table_name: &str, column: &Column) -> bool;
}

/// Whether two filter handles point at the same filter instance
pub fn same_filter(a: &Arc<dyn ColumnFilter>, b: &Arc<dyn ColumnFilter>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Include/exclude filter on column names
///
/// Patterns are globs (`*`, `?`, `[...]`) matched case-insensitively. A column
/// is accepted when it matches at least one include pattern (or there are
/// none) and no exclude pattern.
///
/// # Examples
///
/// ```
/// use dbfixture_catalog::{ColumnFilter, PatternColumnFilter};
/// use dbfixture_types::{Column, DataType};
///
/// let filter = PatternColumnFilter::new()
///     .include("*_ID")
///     .and_then(|f| f.exclude("TMP_*"))
///     .unwrap();
/// assert!(filter.accept("ORDERS", &Column::new("order_id", DataType::Integer)));
/// assert!(!filter.accept("ORDERS", &Column::new("TMP_ID", DataType::Integer)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternColumnFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl PatternColumnFilter {
    /// Create a new empty filter (accepts every column)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConfigurationError` if `pattern` is not a valid glob.
    pub fn include(mut self, pattern: &str) -> CatalogResult<Self> {
        self.includes.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern
    pub fn exclude(mut self, pattern: &str) -> CatalogResult<Self> {
        self.excludes.push(compile(pattern)?);
        Ok(self)
    }

    /// Shorthand: accept exactly the listed column names
    ///
    /// Names are matched literally, glob characters included.
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let includes = names
            .into_iter()
            .filter_map(|name| Pattern::new(&Pattern::escape(name.as_ref())).ok())
            .collect();
        Self {
            includes,
            excludes: Vec::new(),
        }
    }
}

impl ColumnFilter for PatternColumnFilter {
    fn accept(&self, _table_name: &str, column: &Column) -> bool {
        let matches = |p: &Pattern| p.matches_with(&column.name, MATCH_OPTIONS);

        let included = self.includes.is_empty() || self.includes.iter().any(matches);
        included && !self.excludes.iter().any(matches)
    }
}

fn compile(pattern: &str) -> CatalogResult<Pattern> {
    Pattern::new(pattern).map_err(|e| {
        CatalogError::ConfigurationError(format!("invalid column pattern '{}': {}", pattern, e))
    })
}
