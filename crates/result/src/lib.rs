//! Trellis Result - Result-set materialization engine.
//!
//! This crate sits between a raw row source and application code. It
//! provides:
//!
//! - `convert`: The type-conversion pipeline (logical tag -> coerced value)
//! - `ResultSet`: Cursor fetch layer, bulk materializers, lazy metadata,
//!   scoped resource release
//! - `assoc`: The associative-tree builder turning flat rows plus a small
//!   descriptor language into nested container structures
//! - `Rows`: Bounded forward iteration over the fetch layer
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{Row, Value};
//! use trellis_result::ResultSet;
//! use trellis_source::MemorySource;
//!
//! let rows = vec![
//!     Row::from_pairs([("cat", Value::Str("a".into())), ("n", Value::Int(1))]),
//!     Row::from_pairs([("cat", Value::Str("a".into())), ("n", Value::Int(2))]),
//! ];
//! let mut result = ResultSet::new(MemorySource::new(rows));
//! let tree = result.fetch_assoc("cat,*").unwrap();
//! let list = tree.get(&Value::Str("a".into())).unwrap();
//! assert_eq!(list.len(), 2);
//! ```

#![no_std]

extern crate alloc;

mod assoc;
mod convert;
mod iter;
mod result;

pub use assoc::{AssocTree, TreeMap};
pub use convert::{convert, parse_timestamp};
pub use iter::Rows;
pub use result::{Fetched, PairMap, Pairs, ResultSet, TypeMap};
