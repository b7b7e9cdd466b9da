//! The result set: cursor fetch layer, bulk materializers, lazy metadata
//! and scoped resource release.
//!
//! `ResultSet` owns exactly one row-source cursor. All fetch-family
//! operations take `&mut self` and advance the shared cursor, so
//! interleaving an iteration adapter with direct fetches is statically
//! excluded by the borrow checker, and concurrent use from several
//! threads requires exclusive access to the instance.

use crate::assoc::{self, AssocTree};
use crate::convert::convert;
use crate::iter::Rows;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use trellis_core::{ColumnMeta, Error, OrderedMap, Result, Row, TypeTag, Value};
use trellis_source::{detect_tag, RowSource};

/// Conversion table: column name -> logical type tag.
pub type TypeMap = hashbrown::HashMap<String, TypeTag>;

/// Insertion-ordered key -> value mapping produced by `fetch_pairs`.
pub type PairMap = OrderedMap<Value, Value>;

/// Result of `fetch_all`: full rows, or the flat scalar sequence a
/// single-column result collapses to.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetched {
    /// Full rows in fetch order.
    Rows(Vec<Row>),
    /// Single-column results collapse to the column's values in order.
    Scalars(Vec<Value>),
}

/// Result of `fetch_pairs`: a key -> value mapping, or a flat value list
/// when no key column is involved.
#[derive(Clone, Debug, PartialEq)]
pub enum Pairs {
    /// Key-column value -> value-column value; later duplicates win.
    Map(PairMap),
    /// Value-column values in fetch order.
    List(Vec<Value>),
}

/// A result set layered over a row source.
pub struct ResultSet<S: RowSource> {
    source: S,
    position: usize,
    types: TypeMap,
    meta: Option<Vec<ColumnMeta>>,
    released: bool,
}

impl<S: RowSource> ResultSet<S> {
    /// Creates a result set over a row source. The conversion table starts
    /// empty; until populated, fetched values pass through untouched.
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
            types: TypeMap::new(),
            meta: None,
            released: false,
        }
    }

    /// Returns the total number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.source.row_count()
    }

    /// Returns the number of rows fetched so far through this cursor.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    // -----------------------------------------------------------------
    // Cursor fetch layer
    // -----------------------------------------------------------------

    /// Fetches the next row, or None once the result is exhausted.
    ///
    /// Every column present in both the row and the conversion table is
    /// passed through `convert`; columns absent from the table are left
    /// untouched. This and `fetch_scalar` are the only paths by which raw
    /// rows enter the system.
    pub fn fetch_row(&mut self) -> Option<Row> {
        let mut row = self.source.fetch_next()?;
        self.position += 1;
        if !self.types.is_empty() {
            for (column, tag) in &self.types {
                if let Some(value) = row.get_mut(column) {
                    let taken = core::mem::replace(value, Value::Null);
                    *value = convert(taken, *tag);
                }
            }
        }
        Some(row)
    }

    /// Fetches the first column of the next row, converted. Useful for
    /// single-aggregate queries.
    pub fn fetch_scalar(&mut self) -> Option<Value> {
        let row = self.fetch_row()?;
        row.get_index(0).map(|(_, value)| value.clone())
    }

    // -----------------------------------------------------------------
    // Bulk materializers
    // -----------------------------------------------------------------

    /// Fetches all remaining rows after a best-effort rewind.
    ///
    /// An empty result yields `Fetched::Rows(vec![])`. A single-column
    /// result collapses to `Fetched::Scalars` of that column's values in
    /// fetch order; anything wider yields full rows in fetch order.
    pub fn fetch_all(&mut self) -> Fetched {
        self.rewind();
        let Some(first) = self.fetch_row() else {
            return Fetched::Rows(Vec::new());
        };

        if first.len() == 1 {
            let mut values = Vec::new();
            let mut row = first;
            loop {
                if let Some((_, value)) = row.get_index(0) {
                    values.push(value.clone());
                }
                match self.fetch_row() {
                    Some(next) => row = next,
                    None => break,
                }
            }
            return Fetched::Scalars(values);
        }

        let mut rows = Vec::new();
        rows.push(first);
        while let Some(row) = self.fetch_row() {
            rows.push(row);
        }
        Fetched::Rows(rows)
    }

    /// Fetches all rows as a key -> value mapping or a flat value list.
    ///
    /// - both columns given: a mapping from each row's key-column value to
    ///   its value-column value, later duplicate keys overwriting earlier
    ///   ones (last write wins);
    /// - only `value` given: a flat list of that column's values;
    /// - neither given: the first two columns of the first row are
    ///   auto-selected as key and value (the result must have at least two
    ///   columns);
    /// - `key` without `value` is an error.
    pub fn fetch_pairs(&mut self, key: Option<&str>, value: Option<&str>) -> Result<Pairs> {
        if key.is_some() && value.is_none() {
            return Err(Error::invalid_argument(
                "fetch_pairs takes both key and value columns, or neither",
            ));
        }

        self.rewind();
        let Some(first) = self.fetch_row() else {
            return Ok(match (key, value) {
                (None, Some(_)) => Pairs::List(Vec::new()),
                _ => Pairs::Map(PairMap::default()),
            });
        };

        let (key, value) = match (key, value) {
            (None, None) => {
                if first.len() < 2 {
                    return Err(Error::invalid_argument(
                        "fetch_pairs auto-detection needs at least two columns",
                    ));
                }
                let key = first.get_index(0).map(|(n, _)| n.clone()).unwrap_or_default();
                let value = first.get_index(1).map(|(n, _)| n.clone()).unwrap_or_default();
                (Some(key), value)
            }
            (key, Some(value)) => {
                if !first.contains(value) {
                    return Err(Error::unknown_column(value));
                }
                if let Some(key) = key {
                    if !first.contains(key) {
                        return Err(Error::unknown_column(key));
                    }
                }
                (key.map(ToString::to_string), value.to_string())
            }
            (Some(_), None) => unreachable!("checked above"),
        };

        match key {
            None => {
                let mut values = Vec::new();
                let mut row = first;
                loop {
                    values.push(row.get(&value).cloned().unwrap_or(Value::Null));
                    match self.fetch_row() {
                        Some(next) => row = next,
                        None => break,
                    }
                }
                Ok(Pairs::List(values))
            }
            Some(key) => {
                let mut pairs = PairMap::default();
                let mut row = first;
                loop {
                    let k = row.get(&key).cloned().unwrap_or(Value::Null);
                    let v = row.get(&value).cloned().unwrap_or(Value::Null);
                    pairs.insert(k, v);
                    match self.fetch_row() {
                        Some(next) => row = next,
                        None => break,
                    }
                }
                Ok(Pairs::Map(pairs))
            }
        }
    }

    /// Builds a nested associative tree from all rows, shaped by the
    /// descriptor mini-language. See the `assoc` module docs.
    pub fn fetch_assoc(&mut self, descriptor: &str) -> Result<AssocTree> {
        assoc::build(self, descriptor)
    }

    // -----------------------------------------------------------------
    // Type conversion table
    // -----------------------------------------------------------------

    /// Assigns a logical type tag to one column.
    pub fn set_type(&mut self, column: impl Into<String>, tag: TypeTag) {
        self.types.insert(column.into(), tag);
    }

    /// Replaces the conversion table wholesale.
    pub fn set_types(&mut self, types: TypeMap) {
        self.types = types;
    }

    /// Populates the conversion table from the source's column metadata,
    /// deriving a tag per column from its native type name. Columns whose
    /// native type nothing matches are left out of the table.
    pub fn detect_types(&mut self) {
        let metas = self.metadata().to_vec();
        for meta in &metas {
            if let Some(tag) = detect_tag(meta.native_type()) {
                self.types.insert(meta.name().to_string(), tag);
            }
        }
        log::debug!("detected {} column type(s)", self.types.len());
    }

    /// Returns the tag assigned to a column, if any.
    pub fn type_of(&self, column: &str) -> Option<TypeTag> {
        self.types.get(column).copied()
    }

    // -----------------------------------------------------------------
    // Metadata accessor
    // -----------------------------------------------------------------

    /// Returns the column names in result order. Triggers one metadata
    /// discovery on first use; subsequent calls are free.
    pub fn field_names(&mut self) -> Vec<String> {
        self.metadata()
            .iter()
            .map(|meta| meta.name().to_string())
            .collect()
    }

    /// Returns the metadata for a named column, if the source reports one.
    pub fn field_meta(&mut self, name: &str) -> Option<ColumnMeta> {
        self.metadata().iter().find(|meta| meta.name() == name).cloned()
    }

    fn metadata(&mut self) -> &[ColumnMeta] {
        if self.meta.is_none() {
            self.meta = Some(self.source.discover_columns());
        }
        self.meta.as_deref().unwrap_or_default()
    }

    // -----------------------------------------------------------------
    // Iteration adapter
    // -----------------------------------------------------------------

    /// Returns a lazy, forward-only iterator over all remaining rows.
    /// Advancing it advances this result set's cursor.
    pub fn iter(&mut self) -> Rows<'_, S> {
        Rows::new(self, None)
    }

    /// Returns a lazy iterator bounded by an offset and a row limit.
    ///
    /// The offset is applied with a best-effort seek; when the source
    /// refuses to seek, the offset rows are fetched and discarded instead.
    pub fn iter_bounded(&mut self, offset: usize, limit: usize) -> Rows<'_, S> {
        if self.source.seek(offset) {
            self.position = offset;
        } else {
            for _ in 0..offset {
                if self.fetch_row().is_none() {
                    break;
                }
            }
        }
        Rows::new(self, Some(limit))
    }

    // -----------------------------------------------------------------
    // Resource release
    // -----------------------------------------------------------------

    /// Releases the underlying row source. Idempotent: a second call is a
    /// no-op. Also runs on drop if never called explicitly.
    pub fn release(&mut self) {
        if !self.released {
            self.source.release();
            self.released = true;
        }
    }

    /// Best-effort rewind before a bulk read. A refused seek is tolerated:
    /// the bulk read then operates on whatever remains.
    pub(crate) fn rewind(&mut self) {
        if self.source.seek(0) {
            self.position = 0;
        } else {
            log::trace!("rewind refused by source; materializing remaining rows");
        }
    }
}

impl<S: RowSource> Drop for ResultSet<S> {
    fn drop(&mut self) {
        self.release();
    }
}
