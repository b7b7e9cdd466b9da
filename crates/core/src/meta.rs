//! Column metadata reported by a row source.

use alloc::string::String;

/// Metadata for a single result column, as discovered by the row source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name as it appears in fetched rows.
    name: String,
    /// Native type name reported by the source (e.g. "varchar", "bigint").
    native_type: String,
    /// Originating table, when the source knows it.
    table: Option<String>,
}

impl ColumnMeta {
    /// Creates column metadata with a name and native type.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            table: None,
        }
    }

    /// Sets the originating table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the native type name.
    #[inline]
    pub fn native_type(&self) -> &str {
        &self.native_type
    }

    /// Returns the originating table, if known.
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_meta() {
        let meta = ColumnMeta::new("id", "bigint").table("users");
        assert_eq!(meta.name(), "id");
        assert_eq!(meta.native_type(), "bigint");
        assert_eq!(meta.table_name(), Some("users"));
    }

    #[test]
    fn test_column_meta_without_table() {
        let meta = ColumnMeta::new("total", "numeric");
        assert_eq!(meta.table_name(), None);
    }
}
