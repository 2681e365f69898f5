// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table metadata resolution
//!
//! [`DatabaseTableMetadata`] resolves the columns and primary keys of one
//! table from the live catalog, lazily and at most once:
//!
//! ```text
//! Uninitialized ──columns()──▶ ColumnsResolved ──primary_keys()──▶ PrimaryKeysResolved
//!       ▲                                                                │
//!       └──────────────────────────── invalidate() ─────────────────────┘
//! ```
//!
//! Primary keys are re-derived when the configured primary key filter is a
//! different instance than the one used last time. The column index used by
//! [`DatabaseTableMetadata::column_index`] is built on first lookup and lives
//! exactly as long as the cached column list.
//!
//! Resolution is not synchronized; concurrent first access from several
//! threads needs external locking.

use std::collections::HashMap;
use std::sync::Arc;

use dbfixture_types::Column;
use tracing::{debug, warn};

use crate::connection::DatabaseConnection;
use crate::datatype::{DataTypeFactory, create_column, validate_data_type_factory};
use crate::error::{CatalogError, CatalogResult};
use crate::filter::{ColumnFilter, same_filter};
use crate::name::QualifiedTableName;

/// Observable resolution progress of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Uninitialized,
    ColumnsResolved,
    PrimaryKeysResolved,
}

/// Resolved columns plus the index built from them on demand
#[derive(Debug)]
struct ResolvedColumns {
    columns: Arc<[Column]>,
    index: Option<HashMap<String, usize>>,
}

impl ResolvedColumns {
    fn new(columns: Arc<[Column]>) -> Self {
        Self {
            columns,
            index: None,
        }
    }
}

#[derive(Debug)]
enum MetadataState {
    Uninitialized,
    ColumnsResolved(ResolvedColumns),
    PrimaryKeysResolved {
        resolved: ResolvedColumns,
        primary_keys: Arc<[Column]>,
        /// Filter active when `primary_keys` was derived
        key_filter: Option<Arc<dyn ColumnFilter>>,
    },
}

impl MetadataState {
    fn resolved(&self) -> Option<&ResolvedColumns> {
        match self {
            MetadataState::Uninitialized => None,
            MetadataState::ColumnsResolved(resolved)
            | MetadataState::PrimaryKeysResolved { resolved, .. } => Some(resolved),
        }
    }

    fn resolved_mut(&mut self) -> Option<&mut ResolvedColumns> {
        match self {
            MetadataState::Uninitialized => None,
            MetadataState::ColumnsResolved(resolved)
            | MetadataState::PrimaryKeysResolved { resolved, .. } => Some(resolved),
        }
    }

    fn kind(&self) -> ResolutionState {
        match self {
            MetadataState::Uninitialized => ResolutionState::Uninitialized,
            MetadataState::ColumnsResolved(_) => ResolutionState::ColumnsResolved,
            MetadataState::PrimaryKeysResolved { .. } => ResolutionState::PrimaryKeysResolved,
        }
    }
}

/// Lazily resolved, cached metadata of one database table
#[derive(Debug)]
pub struct DatabaseTableMetadata {
    /// Table name as given, possibly qualified
    table_name: String,
    qualified_name: QualifiedTableName,
    connection: Arc<DatabaseConnection>,
    state: MetadataState,
}

impl DatabaseTableMetadata {
    /// Create metadata for `table_name`; nothing is queried yet
    ///
    /// Unqualified names use the connection's default schema.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the table name is empty.
    pub fn new(
        table_name: impl Into<String>,
        connection: Arc<DatabaseConnection>,
    ) -> CatalogResult<Self> {
        let table_name = table_name.into();
        let qualified_name = QualifiedTableName::new(&table_name, connection.schema())?;

        Ok(Self {
            table_name,
            qualified_name,
            connection,
            state: MetadataState::Uninitialized,
        })
    }

    /// Table name exactly as given
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn qualified_table_name(&self) -> &QualifiedTableName {
        &self.qualified_name
    }

    /// Table name for generated statements
    ///
    /// Qualified if the configuration enables qualified table names, and
    /// escaped with the configured escape pattern.
    pub fn escaped_table_name(&self) -> String {
        let config = self.connection.config();
        self.qualified_name
            .with_pattern(config.escape_pattern.as_deref())
            .qualified_name_if_enabled(&config)
    }

    pub fn resolution_state(&self) -> ResolutionState {
        self.state.kind()
    }

    /// Drop every cached result, including the column index
    pub fn invalidate(&mut self) {
        debug!("Invalidating metadata of table '{}'", self.table_name);
        self.state = MetadataState::Uninitialized;
    }

    /// Resolved columns in catalog order
    ///
    /// The first call queries the catalog; later calls return the cached list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MetadataQueryFailure` if the catalog query fails.
    pub fn columns(&mut self) -> CatalogResult<Arc<[Column]>> {
        if let Some(resolved) = self.state.resolved() {
            return Ok(resolved.columns.clone());
        }

        let columns: Arc<[Column]> = self.resolve_columns()?.into();
        self.state = MetadataState::ColumnsResolved(ResolvedColumns::new(columns.clone()));
        Ok(columns)
    }

    /// Primary key columns ordered by key sequence
    ///
    /// With a primary key filter configured, the keys are the resolved columns
    /// the filter accepts, in column order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MetadataQueryFailure` if a catalog query fails.
    pub fn primary_keys(&mut self) -> CatalogResult<Arc<[Column]>> {
        let key_filter = self.connection.config().primary_key_filter;

        if let MetadataState::PrimaryKeysResolved {
            primary_keys,
            key_filter: last_filter,
            ..
        } = &self.state
        {
            if !filter_changed(last_filter.as_ref(), key_filter.as_ref()) {
                return Ok(primary_keys.clone());
            }
            debug!(
                "Primary key filter of table '{}' changed, re-deriving primary keys",
                self.table_name
            );
        }

        let columns = self.columns()?;
        let primary_keys: Arc<[Column]> = match &key_filter {
            Some(filter) => columns
                .iter()
                .filter(|column| filter.accept(&self.table_name, column))
                .cloned()
                .collect(),
            None => self
                .primary_key_names()?
                .iter()
                .filter_map(|name| {
                    let column = columns.iter().find(|c| c.name.eq_ignore_ascii_case(name));
                    if column.is_none() {
                        debug!(
                            "Primary key '{}' of table '{}' is not a resolved column",
                            name, self.table_name
                        );
                    }
                    column.cloned()
                })
                .collect(),
        };

        let resolved = match std::mem::replace(&mut self.state, MetadataState::Uninitialized) {
            MetadataState::ColumnsResolved(resolved)
            | MetadataState::PrimaryKeysResolved { resolved, .. } => resolved,
            MetadataState::Uninitialized => ResolvedColumns::new(columns),
        };
        self.state = MetadataState::PrimaryKeysResolved {
            resolved,
            primary_keys: primary_keys.clone(),
            key_filter,
        };

        Ok(primary_keys)
    }

    /// Zero-based position of `column_name` in the resolved column list
    ///
    /// Lookup is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IllegalState` if the table has no resolved
    /// columns, `CatalogError::NoSuchColumn` if the name is not among them.
    pub fn column_index(&mut self, column_name: &str) -> CatalogResult<usize> {
        if self.state.resolved().is_none() {
            self.columns()?;
        }

        let Some(resolved) = self.state.resolved_mut() else {
            return Err(CatalogError::IllegalState(format!(
                "columns of table '{}' are not resolved",
                self.table_name
            )));
        };

        if resolved.columns.is_empty() {
            return Err(CatalogError::IllegalState(format!(
                "no columns for table '{}'",
                self.table_name
            )));
        }

        let columns = &resolved.columns;
        let index = resolved.index.get_or_insert_with(|| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| (column.name.clone(), i))
                .collect()
        });

        index
            .get(column_name)
            .copied()
            .ok_or_else(|| CatalogError::NoSuchColumn {
                table: self.table_name.clone(),
                column: column_name.to_string(),
                available: columns.iter().map(|c| c.name.clone()).collect(),
            })
    }

    fn resolve_columns(&self) -> CatalogResult<Vec<Column>> {
        let config = self.connection.config();
        let schema = self.qualified_name.schema();
        let table = self.qualified_name.table();
        debug!(
            "Resolving columns of table '{}' (schema={:?}, handler={})",
            self.table_name,
            schema,
            config.metadata_handler.name()
        );

        let factory = config.datatype_factory.as_ref();
        self.check_datatype_factory(factory)?;

        let handler = config.metadata_handler.as_ref();
        let rows = handler
            .get_columns(self.connection.source(), schema, table)
            .map_err(|e| self.query_failure(e))?;

        let mut columns = Vec::new();
        for row in rows {
            let row = row.map_err(|e| self.query_failure(e))?;

            // Catalog lookups may match names as patterns
            if !handler.matches(&row, schema, Some(table), None) {
                debug!(
                    "Skipping <schema.table> '{}.{}' because names do not exactly match",
                    row.table_schem
                        .as_deref()
                        .or(row.table_cat.as_deref())
                        .unwrap_or_default(),
                    row.table_name
                );
                continue;
            }

            if let Some(column) = create_column(&row, factory, config.datatype_warning) {
                columns.push(column);
            }
        }

        if columns.is_empty() {
            if config.datatype_warning {
                warn!(
                    "No columns found for table '{}' that are supported. Will return an empty column list",
                    table
                );
            } else {
                debug!("No supported columns found for table '{}'", table);
            }
        }

        Ok(columns)
    }

    fn primary_key_names(&self) -> CatalogResult<Vec<String>> {
        let config = self.connection.config();
        let schema = self.qualified_name.schema();
        let table = self.qualified_name.table();

        let rows = config
            .metadata_handler
            .get_primary_keys(self.connection.source(), schema, table)
            .map_err(|e| self.query_failure(e))?;

        let mut keys = Vec::new();
        for row in rows {
            let row = row.map_err(|e| self.query_failure(e))?;
            keys.push((row.key_seq, row.column_name));
        }

        // stable: equal sequence numbers keep catalog order
        keys.sort_by_key(|(key_seq, _)| *key_seq);
        Ok(keys.into_iter().map(|(_, name)| name).collect())
    }

    fn check_datatype_factory(&self, factory: &dyn DataTypeFactory) -> CatalogResult<()> {
        if factory.valid_db_products().is_none() {
            return Ok(());
        }

        let product_name = self
            .connection
            .database_product_name()
            .map_err(|e| self.query_failure(e))?;
        if let Some(message) = validate_data_type_factory(factory, &product_name) {
            warn!("Potential problem found: {}", message);
        }
        Ok(())
    }

    fn query_failure(&self, source: CatalogError) -> CatalogError {
        CatalogError::metadata_query(
            self.qualified_name.schema(),
            self.qualified_name.table(),
            source,
        )
    }
}

fn filter_changed(
    last: Option<&Arc<dyn ColumnFilter>>,
    current: Option<&Arc<dyn ColumnFilter>>,
) -> bool {
    match (last, current) {
        (None, None) => false,
        (Some(last), Some(current)) => !same_filter(last, current),
        _ => true,
    }
}
