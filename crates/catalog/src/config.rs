// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog configuration
//!
//! [`DatabaseConfig`] is the runtime configuration read by the metadata layer.
//! [`DatabaseSettings`] is its serializable form, with handlers and data type
//! factories named instead of instantiated.
//!
//! ## Example
//!
//! ```rust
//! use dbfixture_catalog::DatabaseConfig;
//! use serde_json::json;
//!
//! let config = DatabaseConfig::from_json(&json!({
//!     "dbfixture": {
//!         "metadataHandler": "mysql",
//!         "datatypeFactory": "mysql",
//!         "qualifiedTableNames": true
//!     }
//! }))
//! .unwrap();
//! assert_eq!(config.metadata_handler.name(), "mysql");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datatype::{DataTypeFactory, DefaultDataTypeFactory, factory_for_name};
use crate::error::{CatalogError, CatalogResult};
use crate::filter::ColumnFilter;
use crate::handler::{DefaultMetadataHandler, MetadataHandler, MySqlMetadataHandler};

/// Key of the settings object inside a JSON settings payload
pub const SETTINGS_KEY: &str = "dbfixture";

/// Available metadata handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    #[default]
    Default,
    MySql,
}

impl HandlerKind {
    /// Instantiate the handler
    pub fn handler(&self) -> Arc<dyn MetadataHandler> {
        match self {
            HandlerKind::Default => Arc::new(DefaultMetadataHandler),
            HandlerKind::MySql => Arc::new(MySqlMetadataHandler),
        }
    }
}

/// Serializable configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    pub metadata_handler: HandlerKind,
    /// Name of the data type factory (`default`, `mysql`, `postgresql`)
    pub datatype_factory: String,
    pub qualified_table_names: bool,
    pub datatype_warning: bool,
    pub escape_pattern: Option<String>,
    pub table_types: Vec<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            metadata_handler: HandlerKind::Default,
            datatype_factory: "default".to_string(),
            qualified_table_names: false,
            datatype_warning: true,
            escape_pattern: None,
            table_types: default_table_types(),
        }
    }
}

/// Runtime configuration of the metadata layer
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Handler used for every catalog query
    pub metadata_handler: Arc<dyn MetadataHandler>,

    /// Factory turning catalog type names into data types
    pub datatype_factory: Arc<dyn DataTypeFactory>,

    /// Overrides catalog primary keys when set
    pub primary_key_filter: Option<Arc<dyn ColumnFilter>>,

    /// Emit `schema.table` names
    pub qualified_table_names: bool,

    /// Log unrecognized data types and empty column sets at warn level
    pub datatype_warning: bool,

    /// Escape pattern for composed table names (`[?]`, `"`)
    pub escape_pattern: Option<String>,

    /// Table types listed by dataset aggregation
    pub table_types: Vec<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            metadata_handler: Arc::new(DefaultMetadataHandler),
            datatype_factory: Arc::new(DefaultDataTypeFactory),
            primary_key_filter: None,
            qualified_table_names: false,
            datatype_warning: true,
            escape_pattern: None,
            table_types: default_table_types(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("metadata_handler", &self.metadata_handler.name())
            .field("datatype_factory", &self.datatype_factory.name())
            .field("primary_key_filter", &self.primary_key_filter)
            .field("qualified_table_names", &self.qualified_table_names)
            .field("datatype_warning", &self.datatype_warning)
            .field("escape_pattern", &self.escape_pattern)
            .field("table_types", &self.table_types)
            .finish()
    }
}

impl DatabaseConfig {
    /// Build a runtime configuration from settings
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidTypeFactoryConfiguration` if the data type
    /// factory name is unknown, `CatalogError::ConfigurationError` if no table
    /// types are given.
    pub fn from_settings(settings: &DatabaseSettings) -> CatalogResult<Self> {
        if settings.table_types.is_empty() {
            return Err(CatalogError::ConfigurationError(
                "table_types must not be empty".to_string(),
            ));
        }

        Ok(Self {
            metadata_handler: settings.metadata_handler.handler(),
            datatype_factory: factory_for_name(&settings.datatype_factory)?,
            primary_key_filter: None,
            qualified_table_names: settings.qualified_table_names,
            datatype_warning: settings.datatype_warning,
            escape_pattern: settings.escape_pattern.clone(),
            table_types: settings.table_types.clone(),
        })
    }

    /// Parse settings from a JSON payload
    ///
    /// Expected shape:
    /// {
    ///   "dbfixture": {
    ///     "metadataHandler": "default" | "mysql",
    ///     "datatypeFactory": "default" | "mysql" | "postgresql",
    ///     "qualifiedTableNames": false,
    ///     "datatypeWarning": true,
    ///     "escapePattern": "[?]",
    ///     "tableTypes": ["TABLE"]
    ///   }
    /// }
    pub fn from_json(value: &Value) -> CatalogResult<Self> {
        let settings = match value.get(SETTINGS_KEY) {
            Some(settings) => DatabaseSettings::deserialize(settings).map_err(|e| {
                CatalogError::ConfigurationError(format!("invalid settings: {}", e))
            })?,
            None => DatabaseSettings::default(),
        };
        Self::from_settings(&settings)
    }

    /// Builder method: set the primary key filter
    pub fn with_primary_key_filter(mut self, filter: Arc<dyn ColumnFilter>) -> Self {
        self.primary_key_filter = Some(filter);
        self
    }

    /// Builder method: set the metadata handler
    pub fn with_metadata_handler(mut self, handler: Arc<dyn MetadataHandler>) -> Self {
        self.metadata_handler = handler;
        self
    }

    /// Builder method: set the data type factory
    pub fn with_datatype_factory(mut self, factory: Arc<dyn DataTypeFactory>) -> Self {
        self.datatype_factory = factory;
        self
    }

    /// Builder method: enable qualified table names
    pub fn with_qualified_table_names(mut self, enabled: bool) -> Self {
        self.qualified_table_names = enabled;
        self
    }

    /// Builder method: set the escape pattern
    pub fn with_escape_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.escape_pattern = Some(pattern.into());
        self
    }
}

fn default_table_types() -> Vec<String> {
    vec!["TABLE".to_string()]
}
