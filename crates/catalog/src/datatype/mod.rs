// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Data type factories
//!
//! A [`DataTypeFactory`] maps an engine type name from the catalog onto the
//! unified [`DataType`]. Types it cannot map come back as
//! [`DataType::Unknown`]; columns of such types are left out of the resolved
//! column list.
//!
//! Factories may name the database products they are meant for. A mismatch
//! with the connected product is only logged, since the check is a substring
//! heuristic on the product name.

mod default;
mod mysql;
mod postgresql;

pub use default::DefaultDataTypeFactory;
pub use mysql::MySqlDataTypeFactory;
pub use postgresql::PostgresqlDataTypeFactory;

use std::fmt;
use std::sync::Arc;

use dbfixture_types::{Column, DataType};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::row::ColumnRow;

/// Converts catalog type names into unified data types
pub trait DataTypeFactory: Send + Sync + fmt::Debug {
    /// Short name used in configuration (`"default"`, `"mysql"`, ...)
    fn name(&self) -> &'static str;

    /// Map `type_name` (e.g. `"varchar(255)"`) to a [`DataType`]
    fn create_data_type(&self, type_name: &str, column_size: Option<u32>) -> DataType;

    /// Database products this factory is meant for; `None` means any
    fn valid_db_products(&self) -> Option<&[&'static str]> {
        None
    }
}

/// Resolve a factory from its configured name
///
/// # Errors
///
/// Returns `CatalogError::InvalidTypeFactoryConfiguration` for unknown names.
pub fn factory_for_name(name: &str) -> CatalogResult<Arc<dyn DataTypeFactory>> {
    match name.to_lowercase().as_str() {
        "default" => Ok(Arc::new(DefaultDataTypeFactory)),
        "mysql" => Ok(Arc::new(MySqlDataTypeFactory)),
        "postgresql" | "postgres" => Ok(Arc::new(PostgresqlDataTypeFactory)),
        _ => Err(CatalogError::InvalidTypeFactoryConfiguration(format!(
            "'{}' is not a known data type factory (expected one of: default, mysql, postgresql)",
            name
        ))),
    }
}

/// Describe why `factory` may not suit `product_name`, or `None` if it does
pub fn validate_data_type_factory(
    factory: &dyn DataTypeFactory,
    product_name: &str,
) -> Option<String> {
    let valid_products = factory.valid_db_products()?;

    if valid_products
        .iter()
        .any(|product| product_name.contains(product))
    {
        debug!(
            "The current database '{}' fits to the configured data type factory '{}'",
            product_name,
            factory.name()
        );
        return None;
    }

    Some(format!(
        "The configured data type factory '{}' might cause problems with the current database '{}' \
         (e.g. some data types may not be supported properly). The list of supported database \
         products may also be incomplete (list={:?}).",
        factory.name(),
        product_name,
        valid_products
    ))
}

/// Build a [`Column`] from a catalog row, or `None` if its type is unknown
pub fn create_column(
    row: &ColumnRow,
    factory: &dyn DataTypeFactory,
    datatype_warning: bool,
) -> Option<Column> {
    let data_type = factory.create_data_type(&row.type_name, row.column_size);

    if !data_type.is_known() {
        if datatype_warning {
            warn!(
                "{}.{} data type ({}) not recognized and will be ignored. See FAQ for more information.",
                row.table_name, row.column_name, row.type_name
            );
        } else {
            debug!(
                "Skipping column {}.{} with unrecognized data type '{}'",
                row.table_name, row.column_name, row.type_name
            );
        }
        return None;
    }

    let mut column = Column::new(&row.column_name, data_type)
        .with_sql_type_name(&row.type_name)
        .with_nullable(row.nullable);
    column.default_value = row.column_def.clone();
    column.remarks = row.remarks.clone();
    column.auto_increment = row.is_autoincrement;
    Some(column)
}

/// Extract length from type string (e.g., "varchar(255)" -> Some(255))
/// or "numeric(10,2)" -> Some(10) (returns precision)
pub(crate) fn extract_length(type_str: &str) -> Option<usize> {
    type_str
        .find('(')
        .and_then(|pos| {
            let end = type_str[pos + 1..].find([',', ')'])?;
            type_str[pos + 1..pos + 1 + end].trim().parse().ok()
        })
        .filter(|len: &usize| *len != 0)
}

/// Length from the type string, falling back to the catalog column size
pub(crate) fn length_or_size(type_str: &str, column_size: Option<u32>) -> Option<usize> {
    extract_length(type_str).or_else(|| {
        column_size
            .map(|size| size as usize)
            .filter(|size| *size != 0)
    })
}

/// Leading alphabetic type name, lower-cased (`"varchar(10)"` -> `"varchar"`)
pub(crate) fn base_type_name(type_str: &str) -> String {
    type_str
        .trim()
        .to_lowercase()
        .chars()
        .take_while(|c| c.is_alphabetic() || *c == ' ' || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}
