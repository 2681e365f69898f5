// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.
//! Nothing in this crate retries; every failure surfaces to the immediate caller.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A metadata source failed to run a catalog query
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Malformed identifier or argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catalog query failed while resolving metadata for a table
    #[error("Metadata query failed for table '{table}' (schema: {schema:?}): {source}")]
    MetadataQueryFailure {
        schema: Option<String>,
        table: String,
        #[source]
        source: Box<CatalogError>,
    },

    /// Requested column is not part of the resolved column set
    #[error("Column '{column}' not found in table '{table}' (available: {available:?})")]
    NoSuchColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },

    /// Operation not possible in the current metadata state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Configured data type factory cannot be used
    #[error("Invalid data type factory configuration: {0}")]
    InvalidTypeFactoryConfiguration(String),

    /// Invalid catalog configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),

    /// The specified feature is not supported by this catalog implementation
    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

impl CatalogError {
    /// Wrap a raw source failure with the table it was resolving
    pub fn metadata_query(schema: Option<&str>, table: &str, source: CatalogError) -> Self {
        CatalogError::MetadataQueryFailure {
            schema: schema.map(str::to_string),
            table: table.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_query_failure_keeps_context() {
        let err = CatalogError::metadata_query(
            Some("APP"),
            "USERS",
            CatalogError::QueryFailed("permission denied".to_string()),
        );
        let message = err.to_string();
        assert!(message.contains("USERS"));
        assert!(message.contains("APP"));
        assert!(message.contains("permission denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_no_such_column_lists_available() {
        let err = CatalogError::NoSuchColumn {
            table: "USERS".to_string(),
            column: "PHONE".to_string(),
            available: vec!["ID".to_string(), "NAME".to_string()],
        };
        assert!(err.to_string().contains("\"ID\""));
    }
}
