// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbfixture - Metadata Types
//!
//! Value types shared by the catalog and dataset layers:
//!
//! - [`Column`]: one resolved table column (name, normalized type, nullability)
//! - [`DataType`]: engine-independent data type
//! - [`Nullable`]: catalog-reported nullability
//! - [`TableType`]: table kind as reported by the catalog
//!
//! Columns are immutable once resolved and are shared read-only with callers.

pub mod metadata;

// Re-export commonly used types
pub use metadata::{Column, DataType, Nullable, TableType};
