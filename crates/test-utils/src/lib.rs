// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for dbfixture
//!
//! This crate provides common testing components including:
//! - An in-memory [`MockMetadataSource`] with query counters and failure injection
//! - YAML catalog fixtures
//! - Tracing setup for test binaries

pub mod fixtures;
pub mod logging;
pub mod mock_source;

// Re-exports for convenience
pub use fixtures::CatalogFixtures;
pub use logging::init_test_logging;
pub use mock_source::{MockFailure, MockMetadataSource, MockQuery, MockSourceError, MockTable};
