//! Bounded forward iteration over a result set.
//!
//! The adapter is lazy and non-restartable: each `next` pulls one row
//! through the fetch layer, advancing the result set's shared cursor.
//! Dropping the adapter mid-way leaves the cursor wherever it stopped.

use crate::result::ResultSet;
use trellis_core::Row;
use trellis_source::RowSource;

/// Iterator over the remaining rows of a result set, optionally capped.
///
/// Created by [`ResultSet::iter`] and [`ResultSet::iter_bounded`].
pub struct Rows<'a, S: RowSource> {
    result: &'a mut ResultSet<S>,
    remaining: Option<usize>,
}

impl<'a, S: RowSource> Rows<'a, S> {
    pub(crate) fn new(result: &'a mut ResultSet<S>, limit: Option<usize>) -> Self {
        Self {
            result,
            remaining: limit,
        }
    }
}

impl<S: RowSource> Iterator for Rows<'_, S> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.remaining == Some(0) {
            return None;
        }
        let row = self.result.fetch_row()?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The limit is an upper bound; exhaustion may come sooner.
        (0, self.remaining)
    }
}
