// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use dbfixture_types::DataType;

use super::{DataTypeFactory, length_or_size};

const POSTGRESQL_PRODUCTS: &[&str] = &["PostgreSQL"];

/// Factory for PostgreSQL type names
///
/// Handles both the SQL standard spellings (`character varying`) and the
/// internal aliases (`int4`, `float8`). Array types (`integer[]`) map to
/// [`DataType::Array`] of their element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresqlDataTypeFactory;

impl DataTypeFactory for PostgresqlDataTypeFactory {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn create_data_type(&self, type_name: &str, column_size: Option<u32>) -> DataType {
        let type_lower = type_name.trim().to_lowercase();

        if let Some(element) = type_lower.strip_suffix("[]") {
            return match self.create_data_type(element, column_size) {
                DataType::Unknown => DataType::Unknown,
                element => DataType::Array(Box::new(element)),
            };
        }
        // information_schema reports arrays with a leading underscore udt name
        if let Some(element) = type_lower.strip_prefix('_') {
            return match self.create_data_type(element, column_size) {
                DataType::Unknown => DataType::Unknown,
                element => DataType::Array(Box::new(element)),
            };
        }

        // digits are part of the alias names (int4, float8)
        let base: String = type_lower
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == ' ')
            .collect();

        match base.trim() {
            "character" | "char" | "bpchar" => {
                DataType::Char(length_or_size(&type_lower, column_size))
            }
            "character varying" | "varchar" => {
                DataType::Varchar(length_or_size(&type_lower, column_size))
            }
            "text" => DataType::Text,

            // Boolean
            "boolean" | "bool" => DataType::Boolean,

            // Integer types
            "smallint" | "int2" | "smallserial" => DataType::SmallInt,
            "integer" | "int" | "int4" | "serial" => DataType::Integer,
            "bigint" | "int8" | "bigserial" => DataType::BigInt,

            // Decimal types
            "numeric" | "decimal" => DataType::Decimal,
            "real" | "float4" => DataType::Float,
            "double precision" | "float8" => DataType::Double,

            // Binary types
            "bytea" => DataType::Binary,

            // Date/Time types
            "date" => DataType::Date,
            "time" | "time without time zone" => DataType::Time,
            "timetz" | "time with time zone" => {
                DataType::Other("time with time zone".to_string())
            }
            "timestamp" | "timestamp without time zone" => DataType::Timestamp,
            "timestamptz" | "timestamp with time zone" => {
                DataType::Other("timestamp with time zone".to_string())
            }
            "interval" => DataType::Other("interval".to_string()),

            // JSON types (PostgreSQL has both json and jsonb)
            "json" | "jsonb" => DataType::Json,

            "uuid" => DataType::Uuid,

            "cidr" | "inet" | "macaddr" | "xml" => DataType::Other(type_lower.clone()),

            _ => DataType::Unknown,
        }
    }

    fn valid_db_products(&self) -> Option<&[&'static str]> {
        Some(POSTGRESQL_PRODUCTS)
    }
}
