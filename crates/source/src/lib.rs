//! Trellis Source - Row source contract for the Trellis result-set library.
//!
//! This crate defines the capability interface a concrete data source must
//! implement to be consumed by the result-set engine, plus:
//!
//! - `MemorySource`: a Vec-backed reference implementation used by tests,
//!   demos and embedders that have no driver
//! - `detect_tag`: native type name -> logical `TypeTag` heuristics used by
//!   conversion auto-detection

#![no_std]

extern crate alloc;

mod detect;
mod memory;
mod source;

pub use detect::detect_tag;
pub use memory::MemorySource;
pub use source::RowSource;
