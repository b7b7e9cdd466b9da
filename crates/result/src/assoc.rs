//! The associative tree builder.
//!
//! Turns a sequence of flat rows plus a descriptor string into a nested
//! container structure in a single forward pass. The descriptor is a
//! comma-separated token list; each token is either a column name (a
//! value-keyed branching level), the wildcard `*` (an indexed fan-out
//! level appending one branch per row) or the record `#` (the whole row
//! lands as the node's value and the walk keeps drilling into one of its
//! own columns, so `#` must be followed by a column name).
//!
//! The original formulation threads a live reference into a growing
//! nested structure; here the same walk is an explicit `&mut` cursor
//! descending the tree with get-or-insert steps. No row is buffered
//! beyond the one currently walked and grouping emerges purely from
//! reusing value-keyed branches, so the build is O(rows x tokens).

use crate::result::ResultSet;
use alloc::string::String;
use alloc::vec::Vec;
use trellis_core::{Error, OrderedMap, Result, Row, Value};
use trellis_source::RowSource;

/// Wildcard token: an indexed-array branching level.
const WILDCARD: &str = "*";
/// Record token: flatten the row into the node, keep drilling.
const RECORD: &str = "#";

/// Value-keyed branch map of an associative tree.
pub type TreeMap = OrderedMap<Value, AssocTree>;

/// A materialized associative tree. Shape is driven entirely by the
/// descriptor: column tokens produce `Map` levels keyed by row values,
/// wildcards produce `List` levels, and terminals hold a whole `Row` or,
/// under a record token, the row flattened into a `Map` of `Scalar`s.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AssocTree {
    /// An unset slot. Never survives into a finished tree except as the
    /// target of a record token's pending branch.
    #[default]
    Null,
    /// A single column value.
    Scalar(Value),
    /// A whole row as a terminal leaf.
    Row(Row),
    /// Value-keyed branches.
    Map(TreeMap),
    /// Index-keyed branches (wildcard fan-out).
    List(Vec<AssocTree>),
}

impl AssocTree {
    /// Returns true if this is an unset slot.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AssocTree::Null)
    }

    /// Returns the scalar value if this is a Scalar node.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            AssocTree::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the row if this is a Row leaf.
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            AssocTree::Row(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the branch map if this is a Map node.
    pub fn as_map(&self) -> Option<&TreeMap> {
        match self {
            AssocTree::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the branches if this is a List node.
    pub fn as_list(&self) -> Option<&[AssocTree]> {
        match self {
            AssocTree::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a branch by key in a Map node.
    pub fn get(&self, key: &Value) -> Option<&AssocTree> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Looks up a branch by string key in a Map node.
    pub fn get_str(&self, key: &str) -> Option<&AssocTree> {
        self.get(&Value::Str(String::from(key)))
    }

    /// Returns the branch at a position: the nth map entry or list element.
    pub fn get_index(&self, index: usize) -> Option<&AssocTree> {
        match self {
            AssocTree::Map(m) => m.get_index(index).map(|(_, v)| v),
            AssocTree::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Number of branches of a Map or List node; 0 for anything else.
    pub fn len(&self) -> usize {
        match self {
            AssocTree::Map(m) => m.len(),
            AssocTree::List(items) => items.len(),
            _ => 0,
        }
    }

    /// Returns true if this node has no branches.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reshapes an unset slot into a Map and returns its branches.
    ///
    /// A single descriptor produces one node kind per level, so a
    /// non-Map node is never seen here mid-walk.
    fn make_map(&mut self) -> &mut TreeMap {
        if !matches!(self, AssocTree::Map(_)) {
            *self = AssocTree::Map(TreeMap::default());
        }
        match self {
            AssocTree::Map(m) => m,
            _ => unreachable!(),
        }
    }

    /// Reshapes an unset slot into a List and returns its branches.
    fn make_list(&mut self) -> &mut Vec<AssocTree> {
        if !matches!(self, AssocTree::List(_)) {
            *self = AssocTree::List(Vec::new());
        }
        match self {
            AssocTree::List(items) => items,
            _ => unreachable!(),
        }
    }

    /// Flattens a whole row into a Map of column name -> Scalar.
    fn flatten(row: &Row) -> AssocTree {
        let mut map = TreeMap::default();
        for (name, value) in row.iter() {
            map.insert(Value::Str(name.clone()), AssocTree::Scalar(value.clone()));
        }
        AssocTree::Map(map)
    }
}

/// Builds the associative tree for a descriptor over all rows of a
/// result set.
pub(crate) fn build<S: RowSource>(rs: &mut ResultSet<S>, descriptor: &str) -> Result<AssocTree> {
    let mut tokens: Vec<&str> = descriptor.split(',').map(str::trim).collect();

    // A trailing record token adds nothing: the terminal leaf is the
    // whole row either way.
    if tokens.last() == Some(&RECORD) {
        tokens.pop();
    }
    if tokens.is_empty() || tokens == [""] {
        return Err(Error::invalid_descriptor("descriptor is empty"));
    }
    for (i, token) in tokens.iter().enumerate() {
        if *token == RECORD {
            match tokens.get(i + 1) {
                Some(next) if *next != WILDCARD && *next != RECORD => {}
                _ => {
                    return Err(Error::invalid_descriptor(
                        "record token needs a following column",
                    ))
                }
            }
        }
    }

    rs.rewind();
    let Some(first) = rs.fetch_row() else {
        return Ok(AssocTree::Map(TreeMap::default()));
    };

    // All column tokens must exist on the first row before any output is
    // produced.
    for token in &tokens {
        if *token != WILDCARD && *token != RECORD && !first.contains(token) {
            return Err(Error::unknown_column(*token));
        }
    }

    log::trace!("assoc build: {} token(s)", tokens.len());

    if tokens.len() == 1 && tokens[0] != WILDCARD {
        return Ok(build_flat(rs, tokens[0], first));
    }
    Ok(build_walk(rs, &tokens, first))
}

/// Fast path for a single-column descriptor: a flat map from that
/// column's value to the full row. Equivalent to the general walk's
/// single-level case (first row wins on duplicate keys).
fn build_flat<S: RowSource>(rs: &mut ResultSet<S>, column: &str, first: Row) -> AssocTree {
    use indexmap::map::Entry;

    let mut map = TreeMap::default();
    let mut next = Some(first);
    while let Some(row) = next.take() {
        let key = row.get(column).cloned().unwrap_or(Value::Null);
        if let Entry::Vacant(slot) = map.entry(key) {
            slot.insert(AssocTree::Row(row));
        }
        next = rs.fetch_row();
    }
    AssocTree::Map(map)
}

/// The general single-pass walk. For each row a cursor descends from the
/// root, consuming tokens left to right and creating branches on demand;
/// the row is placed at the cursor once tokens are exhausted, unless an
/// earlier row already claimed that slot.
fn build_walk<S: RowSource>(rs: &mut ResultSet<S>, tokens: &[&str], first: Row) -> AssocTree {
    let mut root = AssocTree::Null;
    let mut next = Some(first);

    while let Some(row) = next.take() {
        let mut cursor = &mut root;
        for (i, token) in tokens.iter().enumerate() {
            match *token {
                WILDCARD => {
                    // Always a fresh branch: one array entry per row.
                    let items = cursor.make_list();
                    items.push(AssocTree::Null);
                    cursor = items.last_mut().expect("just pushed");
                }
                RECORD => {
                    let follow = Value::Str(String::from(tokens[i + 1]));
                    if cursor.is_null() {
                        *cursor = AssocTree::flatten(&row);
                        // The follow slot starts over as a branch point;
                        // its scalar column value is dropped.
                        cursor.make_map().insert(follow.clone(), AssocTree::Null);
                    }
                    cursor = cursor.make_map().entry(follow).or_default();
                }
                column => {
                    let key = row.get(column).cloned().unwrap_or(Value::Null);
                    cursor = cursor.make_map().entry(key).or_default();
                }
            }
        }
        if cursor.is_null() {
            *cursor = AssocTree::Row(row);
        }
        next = rs.fetch_row();
    }
    root
}
