//! Row structure for Trellis.
//!
//! This module defines the `Row` struct: one fetched record as an ordered
//! mapping from column name to scalar value. A row is produced fresh by the
//! row source on each advance and is owned exclusively by the caller once
//! returned.

use crate::value::Value;
use alloc::string::String;
use indexmap::IndexMap;

/// Insertion-ordered map used for rows and materialized structures.
pub type OrderedMap<K, V> = IndexMap<K, V, hashbrown::hash_map::DefaultHashBuilder>;

/// One fetched record: column name -> scalar value, in column order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Row {
    columns: OrderedMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self {
            columns: OrderedMap::default(),
        }
    }

    /// Creates a row from (name, value) pairs, preserving order.
    /// A repeated name overwrites the earlier value in place.
    pub fn from_pairs<N, I>(pairs: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.insert(name, value);
        }
        row
    }

    /// Inserts a column value, keeping the position of an existing column.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.columns.insert(name.into(), value);
    }

    /// Gets a value by column name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    /// Gets a mutable reference to a value by column name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.columns.get_mut(name)
    }

    /// Gets the (name, value) entry at the given column position.
    pub fn get_index(&self, index: usize) -> Option<(&String, &Value)> {
        self.columns.get_index(index)
    }

    /// Returns true if the row has a column with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Iterates over column names in order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.columns.keys()
    }

    /// Iterates over values in column order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.values()
    }

    /// Iterates over (name, value) entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.columns.iter()
    }

    /// Returns the number of columns in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if this row has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::from_pairs([
            ("id", Value::Int(1)),
            ("name", Value::Str("Alice".into())),
        ])
    }

    #[test]
    fn test_row_get_by_name() {
        let row = sample();
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("name"), Some(&Value::Str("Alice".into())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_get_by_index() {
        let row = sample();
        let (name, value) = row.get_index(0).unwrap();
        assert_eq!(name, "id");
        assert_eq!(value, &Value::Int(1));
        assert!(row.get_index(2).is_none());
    }

    #[test]
    fn test_row_order_preserved() {
        let row = Row::from_pairs([
            ("z", Value::Int(1)),
            ("a", Value::Int(2)),
            ("m", Value::Int(3)),
        ]);
        let names: alloc::vec::Vec<_> = row.names().cloned().collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_row_insert_overwrites_in_place() {
        let mut row = sample();
        row.insert("id", Value::Int(9));
        assert_eq!(row.get("id"), Some(&Value::Int(9)));
        assert_eq!(row.get_index(0).unwrap().0, "id");
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_contains() {
        let row = sample();
        assert!(row.contains("id"));
        assert!(!row.contains("Id"));
    }

    #[test]
    fn test_row_mutation() {
        let mut row = sample();
        *row.get_mut("id").unwrap() = Value::Int(5);
        assert_eq!(row.get("id"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_row_empty() {
        let row = Row::new();
        assert!(row.is_empty());
        assert_eq!(row.len(), 0);
    }
}
