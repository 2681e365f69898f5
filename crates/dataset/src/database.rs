// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Database-backed dataset
//!
//! Lists the tables of a connection's schema on first use and keeps one
//! [`DatabaseTableMetadata`] per table, in catalog order.
//!
//! Table names come from the configured metadata handler. With qualified table
//! names enabled they carry the schema the handler reports for each row.

use std::sync::Arc;

use dbfixture_catalog::{DatabaseConnection, DatabaseTableMetadata, QualifiedTableName};
use tracing::debug;

use crate::error::{DataSetError, DataSetResult};
use crate::ordered_map::OrderedTableNameMap;

/// All tables of one database schema
#[derive(Debug)]
pub struct DatabaseDataSet {
    connection: Arc<DatabaseConnection>,
    tables: Option<OrderedTableNameMap<DatabaseTableMetadata>>,
}

impl DatabaseDataSet {
    /// Create a dataset over `connection`; no query runs until first access
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self {
            connection,
            tables: None,
        }
    }

    pub fn connection(&self) -> &Arc<DatabaseConnection> {
        &self.connection
    }

    /// Table names in catalog order
    ///
    /// # Errors
    ///
    /// Returns `DataSetError::DuplicateName` if two tables share a name
    /// ignoring case, or `DataSetError::Catalog` if listing tables fails.
    pub fn table_names(&mut self) -> DataSetResult<Vec<String>> {
        Ok(self
            .tables()?
            .table_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Table names in reverse catalog order
    pub fn reversed_table_names(&mut self) -> DataSetResult<Vec<String>> {
        Ok(self
            .tables()?
            .reversed_table_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Metadata of `table_name`, looked up ignoring case
    pub fn table_metadata(&mut self, table_name: &str) -> DataSetResult<&mut DatabaseTableMetadata> {
        self.tables()?
            .get_mut(table_name)
            .ok_or_else(|| DataSetError::NoSuchTable(table_name.to_string()))
    }

    /// Whether the catalog knows `table_name`
    ///
    /// Asks the metadata handler directly; the dataset's own table list is not
    /// consulted.
    pub fn table_exists(&self, table_name: &str) -> DataSetResult<bool> {
        let name = QualifiedTableName::new(table_name, self.connection.schema())?;
        let config = self.connection.config();
        Ok(config.metadata_handler.table_exists(
            self.connection.source(),
            name.schema(),
            name.table(),
        )?)
    }

    fn tables(&mut self) -> DataSetResult<&mut OrderedTableNameMap<DatabaseTableMetadata>> {
        let tables = match self.tables.take() {
            Some(tables) => tables,
            None => self.load_tables()?,
        };
        Ok(self.tables.insert(tables))
    }

    fn load_tables(&self) -> DataSetResult<OrderedTableNameMap<DatabaseTableMetadata>> {
        let config = self.connection.config();
        let handler = config.metadata_handler.as_ref();
        let schema = self.connection.schema();
        debug!(
            "Loading tables of schema {:?} (types={:?}, handler={})",
            schema,
            config.table_types,
            handler.name()
        );

        let rows = handler.get_tables(self.connection.source(), schema, &config.table_types)?;

        let mut tables = OrderedTableNameMap::new();
        for row in rows {
            let row = row?;
            let row_schema = handler.schema_name(&row);
            let name = QualifiedTableName::new(&row.table_name, row_schema.as_deref())?
                .qualified_name_if_enabled(&config);

            let metadata = DatabaseTableMetadata::new(name.as_str(), self.connection.clone())?;
            tables.add(name, metadata)?;
        }

        debug!("Loaded {} tables", tables.len());
        Ok(tables)
    }
}
