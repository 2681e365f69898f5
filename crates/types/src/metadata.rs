// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for resolved table structure
//!
//! This module defines the types used to describe the columns of a table once
//! they have been read from a live database catalog and normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL data types (unified across engines)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataType {
    // Numeric types
    Integer,
    BigInt,
    SmallInt,
    TinyInt,
    Decimal,
    Float,
    Double,

    // String types
    Varchar(Option<usize>),
    Char(Option<usize>),
    Text,

    // Binary types
    Binary,
    VarBinary(Option<usize>),
    Blob,

    // Date/Time types
    Date,
    Time,
    DateTime,
    Timestamp,

    // Boolean
    Boolean,

    // JSON
    Json,

    // Special types
    Uuid,
    Array(Box<DataType>),

    /// Recognized engine-specific type (with original type name)
    Other(String),

    /// Type the configured factory could not map; such columns are not resolved
    Unknown,
}

impl DataType {
    /// Whether the type factory recognized the type
    pub fn is_known(&self) -> bool {
        !matches!(self, DataType::Unknown)
    }
}

/// Table type classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    Table,
    View,
    SystemTable,
    Other(String),
}

impl TableType {
    /// Map a catalog `TABLE_TYPE` value (e.g. `"BASE TABLE"`, `"VIEW"`)
    pub fn from_catalog(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "TABLE" | "BASE TABLE" => TableType::Table,
            "VIEW" => TableType::View,
            "SYSTEM TABLE" | "SYSTEM VIEW" => TableType::SystemTable,
            _ => TableType::Other(value.to_string()),
        }
    }

    /// Catalog spelling used when filtering by table type
    pub fn as_catalog_str(&self) -> &str {
        match self {
            TableType::Table => "TABLE",
            TableType::View => "VIEW",
            TableType::SystemTable => "SYSTEM TABLE",
            TableType::Other(other) => other,
        }
    }
}

/// Nullability as reported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nullable {
    NoNulls,
    Nullable,
    #[default]
    Unknown,
}

impl Nullable {
    /// Map an `IS_NULLABLE` catalog value (`"YES"`, `"NO"`, or empty)
    pub fn from_is_nullable(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "YES" => Nullable::Nullable,
            "NO" => Nullable::NoNulls,
            _ => Nullable::Unknown,
        }
    }
}

/// One resolved table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, exactly as reported by the catalog
    pub name: String,
    /// Normalized data type
    pub data_type: DataType,
    /// Engine-specific type name (e.g. `"varchar(255)"`)
    pub sql_type_name: String,
    /// Nullability
    pub nullable: Nullable,
    /// Default value (as SQL expression string)
    pub default_value: Option<String>,
    /// Column comment/description
    pub remarks: Option<String>,
    /// Whether the column is auto-generated, if the catalog says so
    pub auto_increment: Option<bool>,
}

impl Column {
    /// Create a new column with builder pattern
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            sql_type_name: String::new(),
            nullable: Nullable::Unknown,
            default_value: None,
            remarks: None,
            auto_increment: None,
        }
    }

    /// Builder method: set the engine type name
    pub fn with_sql_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.sql_type_name = type_name.into();
        self
    }

    /// Builder method: set nullability
    pub fn with_nullable(mut self, nullable: Nullable) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method: set default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Builder method: set remarks
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Builder method: set auto increment flag
    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?}, {:?})", self.name, self.data_type, self.nullable)
    }
}
