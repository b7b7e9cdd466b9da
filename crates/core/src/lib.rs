//! Trellis Core - Core types for the Trellis result-set library.
//!
//! This crate provides the foundational types shared by every Trellis crate:
//!
//! - `Value`: Scalar cell values (Null, Bool, Int, Float, Str, Bytes)
//! - `TypeTag`: Logical column types driving value conversion
//! - `Row`: One fetched record as an ordered name -> value mapping
//! - `ColumnMeta`: Per-column metadata reported by a row source
//! - `Error`: Error types for result-set operations
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{Row, TypeTag, Value};
//!
//! let row = Row::from_pairs([
//!     ("id", Value::Int(1)),
//!     ("name", Value::Str("Alice".into())),
//! ]);
//!
//! assert_eq!(row.get("id"), Some(&Value::Int(1)));
//! assert_eq!(row.get_index(1), Some((&"name".to_string(), &Value::Str("Alice".into()))));
//! assert_eq!(TypeTag::Integer.is_numeric(), true);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod meta;
mod row;
mod types;
mod value;

pub use error::{Error, Result};
pub use meta::ColumnMeta;
pub use row::{OrderedMap, Row};
pub use types::TypeTag;
pub use value::Value;
