// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbfixture - Dataset Layer
//!
//! Aggregates many tables of one database into an ordered collection.
//!
//! - [`OrderedTableNameMap`]: insertion-ordered map with case-insensitive,
//!   duplicate-rejecting table names
//! - [`DatabaseDataSet`]: lazily lists a schema's tables through the
//!   configured metadata handler
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dbfixture_catalog::DatabaseConnection;
//! use dbfixture_dataset::DatabaseDataSet;
//!
//! let mut dataset = DatabaseDataSet::new(Arc::new(DatabaseConnection::new(source, Some("app"))));
//! for name in dataset.reversed_table_names()? {
//!     println!("delete from {}", dataset.table_metadata(&name)?.escaped_table_name());
//! }
//! ```

pub mod database;
pub mod error;
pub mod ordered_map;

// Re-exports
pub use database::DatabaseDataSet;
pub use error::{DataSetError, DataSetResult};
pub use ordered_map::OrderedTableNameMap;
