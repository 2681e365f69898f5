// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Ordered table name map
//!
//! Insertion-ordered map from table name to value. Lookups ignore case while
//! names keep the case they were added with.

use std::collections::HashMap;

use crate::error::{DataSetError, DataSetResult};

/// Insertion-ordered, case-insensitive table name map
///
/// # Examples
///
/// ```
/// use dbfixture_dataset::OrderedTableNameMap;
///
/// let mut tables = OrderedTableNameMap::new();
/// tables.add("Users", 1).unwrap();
/// tables.add("ORDERS", 2).unwrap();
/// assert!(tables.add("users", 3).is_err());
///
/// assert_eq!(tables.table_names(), vec!["Users", "ORDERS"]);
/// assert_eq!(tables.reversed_table_names(), vec!["ORDERS", "Users"]);
/// assert_eq!(tables.get("orders"), Some(&2));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedTableNameMap<T> {
    entries: Vec<(String, T)>,
    /// Upper-cased name to position in `entries`
    positions: HashMap<String, usize>,
}

impl<T> Default for OrderedTableNameMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T> OrderedTableNameMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `name`
    ///
    /// # Errors
    ///
    /// Returns `DataSetError::DuplicateName` if a name equal ignoring case
    /// is already present. The map is left unchanged.
    pub fn add(&mut self, name: impl Into<String>, value: T) -> DataSetResult<()> {
        let name = name.into();
        let key = normalize(&name);

        if self.positions.contains_key(&key) {
            return Err(DataSetError::DuplicateName(name));
        }

        self.positions.insert(key, self.entries.len());
        self.entries.push((name, value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        let position = *self.positions.get(&normalize(name))?;
        self.entries.get(position).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let position = *self.positions.get(&normalize(name))?;
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(&normalize(name))
    }

    /// Names in insertion order, as added
    pub fn table_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Names in reverse insertion order
    pub fn reversed_table_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .rev()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Values in insertion order
    pub fn ordered_values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Values in reverse insertion order
    pub fn reversed_values(&self) -> impl Iterator<Item = &T> {
        self.ordered_values().rev()
    }

    /// Name of the most recently added table
    pub fn last_table_name(&self) -> Option<&str> {
        self.entries.last().map(|(name, _)| name.as_str())
    }

    /// Whether `name` (ignoring case) is the most recently added table
    pub fn is_last_table(&self, name: &str) -> bool {
        self.last_table_name()
            .is_some_and(|last| normalize(last) == normalize(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_uppercase()
}
