//! In-memory reference row source.
//!
//! `MemorySource` serves pre-materialized rows from a Vec. It backs the
//! test suites and gives embedders a driver-free way to feed rows into the
//! result-set engine.

use crate::source::RowSource;
use alloc::vec::Vec;
use trellis_core::{ColumnMeta, Row, Value};

/// A row source backed by a vector of rows.
#[derive(Clone, Debug)]
pub struct MemorySource {
    columns: Vec<ColumnMeta>,
    rows: Vec<Row>,
    position: usize,
    released: bool,
}

impl MemorySource {
    /// Creates a source from rows, deriving column metadata from the first
    /// row's value kinds.
    pub fn new(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|(name, value)| ColumnMeta::new(name.clone(), native_name(value)))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            columns,
            rows,
            position: 0,
            released: false,
        }
    }

    /// Creates a source with explicit column metadata.
    pub fn with_columns(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
            released: false,
        }
    }

    /// Returns true once `release` has been called.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Native type name for a value kind, used when metadata is derived
/// instead of declared.
fn native_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "text",
        Value::Bool(_) => "bool",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::Str(_) => "text",
        Value::Bytes(_) => "binary",
    }
}

impl RowSource for MemorySource {
    fn seek(&mut self, position: usize) -> bool {
        if self.released || position > self.rows.len() {
            return false;
        }
        self.position = position;
        true
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn fetch_next(&mut self) -> Option<Row> {
        if self.released {
            return None;
        }
        let row = self.rows.get(self.position).cloned()?;
        self.position += 1;
        Some(row)
    }

    fn release(&mut self) {
        if !self.released {
            self.rows = Vec::new();
            self.released = true;
        }
    }

    fn discover_columns(&self) -> Vec<ColumnMeta> {
        self.columns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rows() -> Vec<Row> {
        vec![
            Row::from_pairs([("id", Value::Int(1)), ("name", Value::Str("a".into()))]),
            Row::from_pairs([("id", Value::Int(2)), ("name", Value::Str("b".into()))]),
        ]
    }

    #[test]
    fn test_fetch_in_order() {
        let mut source = MemorySource::new(rows());
        assert_eq!(source.fetch_next().unwrap().get("id"), Some(&Value::Int(1)));
        assert_eq!(source.fetch_next().unwrap().get("id"), Some(&Value::Int(2)));
        assert!(source.fetch_next().is_none());
    }

    #[test]
    fn test_seek() {
        let mut source = MemorySource::new(rows());
        source.fetch_next();
        source.fetch_next();
        assert!(source.seek(0));
        assert_eq!(source.fetch_next().unwrap().get("id"), Some(&Value::Int(1)));
        assert!(source.seek(2));
        assert!(!source.seek(3));
    }

    #[test]
    fn test_row_count() {
        let source = MemorySource::new(rows());
        assert_eq!(source.row_count(), 2);
        assert_eq!(MemorySource::new(vec![]).row_count(), 0);
    }

    #[test]
    fn test_release_idempotent() {
        let mut source = MemorySource::new(rows());
        source.release();
        assert!(source.is_released());
        source.release();
        assert!(source.is_released());
        assert!(source.fetch_next().is_none());
        assert!(!source.seek(0));
    }

    #[test]
    fn test_derived_columns() {
        let source = MemorySource::new(rows());
        let meta = source.discover_columns();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].name(), "id");
        assert_eq!(meta[0].native_type(), "integer");
        assert_eq!(meta[1].native_type(), "text");
    }

    #[test]
    fn test_explicit_columns() {
        let columns = vec![ColumnMeta::new("id", "serial").table("users")];
        let source = MemorySource::with_columns(columns, rows());
        assert_eq!(source.discover_columns()[0].native_type(), "serial");
    }

    #[test]
    fn test_empty_source_has_no_columns() {
        let source = MemorySource::new(vec![]);
        assert!(source.discover_columns().is_empty());
    }
}
