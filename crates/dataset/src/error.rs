// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for dataset operations

use dbfixture_catalog::CatalogError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for dataset operations
pub type DataSetResult<T> = Result<T, DataSetError>;

/// Errors that can occur while aggregating tables
#[derive(Debug, Error, Clone, Serialize)]
pub enum DataSetError {
    /// Requested table is not part of the dataset
    #[error("Table not found: {0}")]
    NoSuchTable(String),

    /// A table with the same name (ignoring case) was already added
    #[error("Duplicate table name: {0}")]
    DuplicateName(String),

    /// Catalog lookup failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataSetError::DuplicateName("users".to_string());
        assert_eq!(err.to_string(), "Duplicate table name: users");

        let err = DataSetError::NoSuchTable("ORDERS".to_string());
        assert_eq!(err.to_string(), "Table not found: ORDERS");
    }

    #[test]
    fn test_catalog_error_is_transparent() {
        let err: DataSetError = CatalogError::QueryFailed("timeout".to_string()).into();
        assert_eq!(err.to_string(), "Query execution failed: timeout");
    }
}
