// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use dbfixture_types::DataType;

use super::{DataTypeFactory, base_type_name, length_or_size};

/// Factory for standard SQL type names; usable with any product
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDataTypeFactory;

impl DataTypeFactory for DefaultDataTypeFactory {
    fn name(&self) -> &'static str {
        "default"
    }

    fn create_data_type(&self, type_name: &str, column_size: Option<u32>) -> DataType {
        match base_type_name(type_name).as_str() {
            "tinyint" => DataType::TinyInt,
            "smallint" => DataType::SmallInt,
            "int" | "integer" => DataType::Integer,
            "bigint" => DataType::BigInt,
            "decimal" | "numeric" => DataType::Decimal,
            "real" | "float" => DataType::Float,
            "double" | "double precision" => DataType::Double,
            "varchar" | "character varying" | "nvarchar" => {
                DataType::Varchar(length_or_size(type_name, column_size))
            }
            "char" | "character" | "nchar" => DataType::Char(length_or_size(type_name, column_size)),
            "clob" | "nclob" | "text" | "longvarchar" => DataType::Text,
            "binary" => DataType::Binary,
            "varbinary" | "longvarbinary" => {
                DataType::VarBinary(length_or_size(type_name, column_size))
            }
            "blob" => DataType::Blob,
            "date" => DataType::Date,
            "time" => DataType::Time,
            "timestamp" => DataType::Timestamp,
            "boolean" | "bit" => DataType::Boolean,
            _ => DataType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names() {
        let factory = DefaultDataTypeFactory;
        assert_eq!(factory.create_data_type("INTEGER", None), DataType::Integer);
        assert_eq!(factory.create_data_type("BIGINT", None), DataType::BigInt);
        assert_eq!(
            factory.create_data_type("VARCHAR", Some(64)),
            DataType::Varchar(Some(64))
        );
        assert_eq!(factory.create_data_type("CLOB", None), DataType::Text);
        assert_eq!(factory.create_data_type("TIMESTAMP", None), DataType::Timestamp);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            DefaultDataTypeFactory.create_data_type("SDO_GEOMETRY", None),
            DataType::Unknown
        );
    }
}
