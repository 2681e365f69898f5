// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Raw catalog rows
//!
//! Rows as returned by a [`MetadataSource`](crate::MetadataSource) before any
//! normalization. Field meaning follows the usual catalog layout: `table_cat`
//! is the catalog (a database on MySQL), `table_schem` the schema.

use serde::{Deserialize, Serialize};

use dbfixture_types::Nullable;

/// Namespace fields every catalog row carries
pub trait CatalogRow {
    fn table_cat(&self) -> Option<&str>;
    fn table_schem(&self) -> Option<&str>;
    fn table_name(&self) -> &str;
}

/// One row of a column catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRow {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    /// Engine type name, possibly with parameters (`varchar(255)`)
    pub type_name: String,
    pub column_size: Option<u32>,
    pub nullable: Nullable,
    pub column_def: Option<String>,
    pub remarks: Option<String>,
    pub is_autoincrement: Option<bool>,
}

/// One row of a table catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRow {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub table_type: String,
}

/// One row of a primary key catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryKeyRow {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    /// 1-based position of the column within the key
    pub key_seq: i32,
}

macro_rules! impl_catalog_row {
    ($($row:ty),*) => {
        $(
            impl CatalogRow for $row {
                fn table_cat(&self) -> Option<&str> {
                    self.table_cat.as_deref()
                }

                fn table_schem(&self) -> Option<&str> {
                    self.table_schem.as_deref()
                }

                fn table_name(&self) -> &str {
                    &self.table_name
                }
            }
        )*
    };
}

impl_catalog_row!(ColumnRow, TableRow, PrimaryKeyRow);
