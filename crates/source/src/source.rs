//! The row source capability trait.

use alloc::vec::Vec;
use trellis_core::{ColumnMeta, Row};

/// Capability interface for a cursor-like row producer.
///
/// The result-set engine never assumes a concrete storage engine; a driver
/// implements this trait and is composed into the engine by value. All
/// methods are synchronous and the cursor is single-threaded; whatever I/O
/// the implementation performs is opaque to the engine.
pub trait RowSource {
    /// Repositions the cursor. Returns false if the position is out of
    /// range or seeking is unsupported; callers using seek to rewind
    /// before a bulk read must tolerate a false return and continue from
    /// the current position.
    fn seek(&mut self, position: usize) -> bool;

    /// Returns the total number of rows in the result.
    fn row_count(&self) -> usize;

    /// Returns the next row and advances the cursor, or None once the
    /// result is exhausted. Exhaustion is a normal return, not an error.
    fn fetch_next(&mut self) -> Option<Row>;

    /// Releases the underlying resource. Must be idempotent: a second
    /// call is a no-op, and release must never panic during teardown.
    fn release(&mut self);

    /// Reports per-column metadata in result order.
    fn discover_columns(&self) -> Vec<ColumnMeta>;
}
