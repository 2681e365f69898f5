// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbfixture - Catalog Layer
//!
//! This crate discovers, normalizes and caches the structure of relational
//! tables (columns, primary keys, qualified names) from a live database. It is
//! the foundation for comparing and loading test fixture data.
//!
//! ## Architecture
//!
//! - [`MetadataSource`]: synchronous catalog query surface of one connection
//!   (live sources behind the `mysql` / `postgresql` features)
//! - [`MetadataHandler`]: engine quirks (catalog vs. schema) on top of a source
//! - [`DataTypeFactory`]: catalog type names to [`DataType`]
//! - [`QualifiedTableName`]: `schema.table` parsing, composition and escaping
//! - [`DatabaseTableMetadata`]: lazily resolved, cached columns, primary keys
//!   and column index of one table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dbfixture_catalog::{DatabaseConnection, DatabaseTableMetadata};
//!
//! let connection = Arc::new(DatabaseConnection::new(source, Some("app")));
//! let mut users = DatabaseTableMetadata::new("users", connection)?;
//! for column in users.columns()?.iter() {
//!     println!("{}", column);
//! }
//! let id = users.column_index("id")?;
//! ```

pub mod config;
pub mod connection;
pub mod datatype;
pub mod error;
pub mod filter;
pub mod handler;
#[cfg(feature = "mysql")]
pub mod live_mysql;
#[cfg(feature = "postgresql")]
pub mod live_postgres;
pub mod name;
pub mod row;
pub mod table_metadata;
pub mod r#trait;

// Re-exports
pub use config::{DatabaseConfig, DatabaseSettings, HandlerKind};
pub use connection::DatabaseConnection;
pub use datatype::{
    DataTypeFactory, DefaultDataTypeFactory, MySqlDataTypeFactory, PostgresqlDataTypeFactory,
};
pub use dbfixture_types::{Column, DataType, Nullable, TableType};
pub use error::{CatalogError, CatalogResult};
pub use filter::{ColumnFilter, PatternColumnFilter};
pub use handler::{DefaultMetadataHandler, MetadataHandler, MySqlMetadataHandler};
#[cfg(feature = "mysql")]
pub use live_mysql::LiveMySqlSource;
#[cfg(feature = "postgresql")]
pub use live_postgres::LivePostgresSource;
pub use name::{QualifiedTableName, compose_qualified_name, escape_name};
pub use row::{CatalogRow, ColumnRow, PrimaryKeyRow, TableRow};
pub use table_metadata::{DatabaseTableMetadata, ResolutionState};
pub use r#trait::{MetadataSource, RowStream, like_match};
