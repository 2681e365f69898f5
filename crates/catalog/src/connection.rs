// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Database connection
//!
//! Bundles the metadata source of one connection with its default schema and
//! configuration. The configuration sits behind a lock so that callers can
//! swap it (for instance the primary key filter) while table metadata objects
//! hold on to the connection.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::DatabaseConfig;
use crate::error::CatalogResult;
use crate::r#trait::MetadataSource;

/// Metadata source, default schema and configuration of one connection
#[derive(Debug)]
pub struct DatabaseConnection {
    source: Arc<dyn MetadataSource>,
    schema: Option<String>,
    config: RwLock<DatabaseConfig>,
}

impl DatabaseConnection {
    /// Create a connection with the default configuration
    ///
    /// # Arguments
    ///
    /// * `source` - Catalog query surface of the live database
    /// * `schema` - Schema used for unqualified table names
    pub fn new(source: Arc<dyn MetadataSource>, schema: Option<&str>) -> Self {
        Self::with_config(source, schema, DatabaseConfig::default())
    }

    /// Create a connection with a custom configuration
    pub fn with_config(
        source: Arc<dyn MetadataSource>,
        schema: Option<&str>,
        config: DatabaseConfig,
    ) -> Self {
        Self {
            source,
            schema: schema.filter(|s| !s.is_empty()).map(str::to_string),
            config: RwLock::new(config),
        }
    }

    /// Default schema for unqualified table names
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn source(&self) -> &dyn MetadataSource {
        self.source.as_ref()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> DatabaseConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the configuration
    pub fn set_config(&self, config: DatabaseConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Modify the configuration in place
    pub fn update_config(&self, update: impl FnOnce(&mut DatabaseConfig)) {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut config);
    }

    /// Product name reported by the database
    pub fn database_product_name(&self) -> CatalogResult<String> {
        self.source.database_product_name()
    }
}
