// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample catalogs
//!
//! Each fixture is a YAML document for [`MockMetadataSource::from_yaml`](crate::MockMetadataSource::from_yaml).

/// Sample catalogs for testing
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// Schema-based shop catalog (`APP` schema)
    ///
    /// `USER_ROLE` and `USERXROLE` share a `LIKE` match, `ORDER_ITEMS` has a
    /// composite key and `ACTIVE_USERS` is a view.
    pub const fn shop_schema() -> &'static str {
        r#"
product_name: PostgreSQL
tables:
  - schema: APP
    name: USERS
    columns:
      - { name: ID, type: BIGINT, nullable: false, auto_increment: true }
      - { name: NAME, type: VARCHAR, size: 100 }
      - { name: EMAIL, type: VARCHAR, size: 255, nullable: false }
    primary_key: [ID]
  - schema: APP
    name: ORDERS
    columns:
      - { name: ID, type: BIGINT, nullable: false }
      - { name: USER_ID, type: BIGINT, nullable: false }
      - { name: TOTAL, type: NUMERIC }
      - { name: CREATED_AT, type: TIMESTAMP }
    primary_key: [ID]
  - schema: APP
    name: ORDER_ITEMS
    columns:
      - { name: ORDER_ID, type: BIGINT, nullable: false }
      - { name: LINE_NO, type: INTEGER, nullable: false }
      - { name: PRODUCT, type: TEXT }
    primary_key: [ORDER_ID, LINE_NO]
  - schema: APP
    name: USER_ROLE
    columns:
      - { name: USER_ID, type: BIGINT }
      - { name: ROLE, type: VARCHAR, size: 20 }
  - schema: APP
    name: USERXROLE
    columns:
      - { name: LEGACY, type: TEXT }
  - schema: APP
    name: ACTIVE_USERS
    type: VIEW
    columns:
      - { name: ID, type: BIGINT }
"#
    }

    /// Catalog-based shop database (`shop` database, MySQL-like)
    pub const fn mysql_shop() -> &'static str {
        r#"
product_name: MySQL
tables:
  - catalog: shop
    name: customers
    columns:
      - { name: id, type: "int(11)", nullable: false, auto_increment: true }
      - { name: active, type: "tinyint(1)" }
      - { name: email, type: "varchar(255)", size: 255 }
    primary_key: [id]
  - catalog: shop
    name: invoices
    columns:
      - { name: id, type: "bigint(20)", nullable: false }
      - { name: customer_id, type: "int(11)" }
      - { name: status, type: "enum('open','paid')" }
    primary_key: [id]
"#
    }

    /// Table with a column type no factory knows
    pub const fn unknown_types() -> &'static str {
        r#"
tables:
  - schema: APP
    name: SHAPES
    columns:
      - { name: ID, type: INTEGER, nullable: false }
      - { name: OUTLINE, type: GEOMETRY }
      - { name: LABEL, type: VARCHAR, size: 40 }
    primary_key: [ID]
"#
    }
}
