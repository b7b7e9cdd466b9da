//! Logical column type tags for Trellis.
//!
//! A `TypeTag` is assigned per column name, independent of whatever native
//! type the row source reports, and drives value conversion on fetch.

/// Logical column types recognized by the conversion pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Textual data, coerced to a string
    Text,
    /// Opaque binary data, passed through untouched
    Binary,
    /// Boolean
    Bool,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// Auto-incrementing integer (serial/identity columns)
    Counter,
    /// Calendar date, parsed to an epoch timestamp
    Date,
    /// Date and time, parsed to an epoch timestamp
    DateTime,
}

impl TypeTag {
    /// Returns true for tags that coerce to a numeric primitive.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Counter | TypeTag::Float)
    }

    /// Returns true for tags converted by timestamp parsing.
    pub fn is_temporal(&self) -> bool {
        matches!(self, TypeTag::Date | TypeTag::DateTime)
    }
}
