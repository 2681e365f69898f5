// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Qualified table names
//!
//! Parsing and composition of `schema.table` identifiers.
//!
//! The *first* `.` splits a raw name into schema and table; everything after it
//! is the table part, even if it contains more dots. Names without a dot take
//! the caller's default schema.
//!
//! ## Escaping
//!
//! An escape pattern wraps each dot-delimited segment of a name:
//!
//! | Pattern | `NAME` | `S.T` |
//! |---|---|---|
//! | `[?]` | `[NAME]` | `[S].[T]` |
//! | `"` | `"NAME"` | `"S"."T"` |
//!
//! Any other pattern shape is invalid; the name is then left untouched and a
//! warning is logged. Escaping assumes unescaped input.

use std::fmt;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::error::{CatalogError, CatalogResult};

/// A table name split into optional schema and table parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTableName {
    schema: Option<String>,
    table: String,
    escape_pattern: Option<String>,
}

impl QualifiedTableName {
    /// Parse `table_name`, falling back to `default_schema` when it is unqualified
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the table part is empty.
    pub fn new(table_name: &str, default_schema: Option<&str>) -> CatalogResult<Self> {
        Self::with_escape_pattern(table_name, default_schema, None)
    }

    /// Parse `table_name` and remember an escape pattern for composition
    pub fn with_escape_pattern(
        table_name: &str,
        default_schema: Option<&str>,
        escape_pattern: Option<&str>,
    ) -> CatalogResult<Self> {
        let (schema, table) = match table_name.split_once('.') {
            Some((schema, table)) => (Some(schema), table),
            None => (default_schema, table_name),
        };

        if table.is_empty() {
            return Err(CatalogError::InvalidArgument(format!(
                "table name must not be empty (got '{}')",
                table_name
            )));
        }

        Ok(Self {
            schema: schema.filter(|s| !s.is_empty()).map(str::to_string),
            table: table.to_string(),
            escape_pattern: escape_pattern.map(str::to_string),
        })
    }

    /// Schema part, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Plain, unqualified table name
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn escape_pattern(&self) -> Option<&str> {
        self.escape_pattern.as_deref()
    }

    /// Same name with a different escape pattern
    pub fn with_pattern(&self, escape_pattern: Option<&str>) -> Self {
        Self {
            escape_pattern: escape_pattern.map(str::to_string),
            ..self.clone()
        }
    }

    /// Table name with the schema prepended when a schema is available
    pub fn qualified_name(&self) -> String {
        compose_qualified_name(
            self.schema.as_deref(),
            &self.table,
            self.escape_pattern.as_deref(),
        )
    }

    /// Qualified name if `config` enables qualified table names, else the table part
    ///
    /// The table part still goes through the escape pattern.
    pub fn qualified_name_if_enabled(&self, config: &DatabaseConfig) -> String {
        if config.qualified_table_names {
            debug!("Qualified table names enabled, returning qualified name");
            self.qualified_name()
        } else {
            debug!("Qualified table names disabled, returning plain table name");
            compose_qualified_name(None, &self.table, self.escape_pattern.as_deref())
        }
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QualifiedTableName[schema={}, table={}, escapePattern={}]",
            self.schema.as_deref().unwrap_or("null"),
            self.table,
            self.escape_pattern.as_deref().unwrap_or("null")
        )
    }
}

/// Qualify `name` with `prefix` unless there is no prefix or `name` is already qualified
///
/// With an escape pattern both parts are escaped first; the "already qualified"
/// check looks at the escaped name.
///
/// ```
/// use dbfixture_catalog::compose_qualified_name;
///
/// assert_eq!(compose_qualified_name(None, "NAME", None), "NAME");
/// assert_eq!(compose_qualified_name(Some("PREFIX"), "NAME", None), "PREFIX.NAME");
/// assert_eq!(compose_qualified_name(Some("PREFIX2"), "PREFIX1.NAME", None), "PREFIX1.NAME");
/// ```
pub fn compose_qualified_name(
    prefix: Option<&str>,
    name: &str,
    escape_pattern: Option<&str>,
) -> String {
    debug!(
        "compose_qualified_name(prefix={:?}, name={}, escape_pattern={:?})",
        prefix, name, escape_pattern
    );

    let (prefix, name) = match escape_pattern {
        Some(pattern) => (
            prefix.map(|p| escape_name(p, pattern)),
            escape_name(name, pattern),
        ),
        None => (prefix.map(str::to_string), name.to_string()),
    };

    match prefix {
        Some(prefix) if !prefix.is_empty() && !name.contains('.') => {
            format!("{}.{}", prefix, name)
        }
        _ => name,
    }
}

/// Escape every dot-delimited segment of `name` with `pattern`
pub fn escape_name(name: &str, pattern: &str) -> String {
    match EscapePattern::parse(pattern) {
        Some(escape) => escape.apply(name),
        None => {
            warn!(
                "Invalid escape pattern '{}'. Will not escape name '{}'.",
                pattern, name
            );
            name.to_string()
        }
    }
}

/// Prefix/suffix literals derived from an escape pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EscapePattern<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> EscapePattern<'a> {
    fn parse(pattern: &'a str) -> Option<Self> {
        if let Some((prefix, suffix)) = pattern.split_once('?') {
            return Some(Self { prefix, suffix });
        }

        let mut chars = pattern.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Some(Self {
                prefix: pattern,
                suffix: pattern,
            }),
            _ => None,
        }
    }

    fn apply(&self, name: &str) -> String {
        match name.split_once('.') {
            Some((head, tail)) => format!("{}.{}", self.apply(head), self.apply(tail)),
            None => format!("{}{}{}", self.prefix, name, self.suffix),
        }
    }
}
