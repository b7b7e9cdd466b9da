//! Native type name heuristics.
//!
//! Maps the type names a driver reports (e.g. "VARCHAR(255)", "bigint
//! unsigned", "timestamptz") onto logical `TypeTag`s. Used by conversion
//! auto-detection; a name nothing matches yields None and the column is
//! left unconverted.

use alloc::string::String;
use trellis_core::TypeTag;

/// Derives a logical type tag from a native type name.
///
/// Matching is case-insensitive and ignores length suffixes. Longer
/// keywords are tried before their substrings (datetime before date,
/// serial/counter before int).
pub fn detect_tag(native_type: &str) -> Option<TypeTag> {
    let name: String = native_type
        .chars()
        .take_while(|c| *c != '(')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    const RULES: &[(&str, TypeTag)] = &[
        ("datetime", TypeTag::DateTime),
        ("timestamp", TypeTag::DateTime),
        ("date", TypeTag::Date),
        ("time", TypeTag::DateTime),
        ("counter", TypeTag::Counter),
        ("serial", TypeTag::Counter),
        ("identity", TypeTag::Counter),
        ("int", TypeTag::Integer),
        ("long", TypeTag::Integer),
        ("float", TypeTag::Float),
        ("double", TypeTag::Float),
        ("real", TypeTag::Float),
        ("decimal", TypeTag::Float),
        ("numeric", TypeTag::Float),
        ("money", TypeTag::Float),
        ("bool", TypeTag::Bool),
        ("blob", TypeTag::Binary),
        ("binary", TypeTag::Binary),
        ("bytea", TypeTag::Binary),
        ("raw", TypeTag::Binary),
        ("char", TypeTag::Text),
        ("text", TypeTag::Text),
        ("string", TypeTag::Text),
    ];

    RULES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, tag)| *tag)
}
