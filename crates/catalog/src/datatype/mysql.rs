// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use dbfixture_types::DataType;

use super::{DataTypeFactory, length_or_size};

const MYSQL_PRODUCTS: &[&str] = &["MySQL"];

/// Factory for MySQL type names (`varchar(255)`, `int unsigned`, `longtext`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDataTypeFactory;

impl DataTypeFactory for MySqlDataTypeFactory {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn create_data_type(&self, type_name: &str, column_size: Option<u32>) -> DataType {
        let type_lower = type_name.to_lowercase();

        // Parse type with parameters (e.g., varchar(255), decimal(10,2))
        let base: String = type_lower
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect();

        match base.as_str() {
            // Integer types
            "tinyint" => {
                if type_lower.starts_with("tinyint(1)") {
                    DataType::Boolean
                } else {
                    DataType::TinyInt
                }
            }
            "smallint" | "mediumint" => DataType::SmallInt,
            "int" | "integer" => DataType::Integer,
            "bigint" => DataType::BigInt,

            // Decimal types
            "decimal" | "numeric" => DataType::Decimal,
            "float" => DataType::Float,
            "double" | "real" => DataType::Double,

            // String types
            "varchar" => DataType::Varchar(length_or_size(&type_lower, column_size)),
            "char" => DataType::Char(length_or_size(&type_lower, column_size)),
            "text" | "tinytext" | "mediumtext" | "longtext" => DataType::Text,

            // Binary types
            "binary" => DataType::Binary,
            "varbinary" => DataType::VarBinary(length_or_size(&type_lower, column_size)),
            "blob" | "tinyblob" | "mediumblob" | "longblob" => DataType::Blob,

            // Date/Time types
            "date" => DataType::Date,
            "time" => DataType::Time,
            "datetime" => DataType::DateTime,
            "timestamp" => DataType::Timestamp,
            "year" => DataType::Other("year".to_string()),

            // Boolean
            "bool" | "boolean" | "bit" => DataType::Boolean,

            // JSON
            "json" => DataType::Json,

            "enum" | "set" => DataType::Other(type_name.to_string()),

            _ => DataType::Unknown,
        }
    }

    fn valid_db_products(&self) -> Option<&[&'static str]> {
        Some(MYSQL_PRODUCTS)
    }
}
