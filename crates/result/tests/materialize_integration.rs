//! End-to-end tests for the materialization engine: conversion, bulk
//! materializers and the associative tree builder working together over a
//! memory source.

use trellis_core::{ColumnMeta, Row, TypeTag, Value};
use trellis_result::{AssocTree, Fetched, Pairs, ResultSet};
use trellis_source::{MemorySource, RowSource};

fn orders() -> Vec<Row> {
    let mut rows = Vec::new();
    for (id, customer, product, qty) in [
        (1, "alice", "apples", 2),
        (2, "alice", "pears", 5),
        (3, "bob", "apples", 1),
        (4, "alice", "apples", 7),
    ] {
        rows.push(Row::from_pairs([
            ("id", Value::Int(id)),
            ("customer", Value::Str(customer.into())),
            ("product", Value::Str(product.into())),
            ("qty", Value::Int(qty)),
        ]));
    }
    rows
}

#[test]
fn detected_types_convert_on_every_fetch_path() {
    let columns = vec![
        ColumnMeta::new("id", "serial"),
        ColumnMeta::new("price", "decimal(10,2)"),
        ColumnMeta::new("bought", "datetime"),
    ];
    let rows = vec![Row::from_pairs([
        ("id", Value::Str("7".into())),
        ("price", Value::Str("19.90".into())),
        ("bought", Value::Str("2021-01-01 00:00:00".into())),
    ])];
    let mut rs = ResultSet::new(MemorySource::with_columns(columns, rows));
    rs.detect_types();

    let row = rs.fetch_row().unwrap();
    assert_eq!(row.get("id"), Some(&Value::Int(7)));
    assert_eq!(row.get("price"), Some(&Value::Float(19.90)));
    assert_eq!(row.get("bought"), Some(&Value::Int(1_609_459_200)));
}

#[test]
fn grouped_tree_over_converted_rows() {
    let mut rs = ResultSet::new(MemorySource::new(orders()));
    let tree = rs.fetch_assoc("customer,product,*").unwrap();

    let alice = tree.get(&Value::Str("alice".into())).unwrap();
    let apples = alice.get(&Value::Str("apples".into())).unwrap();
    // two alice/apples orders fan out without deduplication
    assert_eq!(apples.len(), 2);
    assert_eq!(
        apples.get_index(0).unwrap().as_row().unwrap().get("id"),
        Some(&Value::Int(1))
    );
    assert_eq!(
        apples.get_index(1).unwrap().as_row().unwrap().get("id"),
        Some(&Value::Int(4))
    );

    let bob = tree.get(&Value::Str("bob".into())).unwrap();
    assert_eq!(bob.len(), 1);
}

#[test]
fn bulk_materializers_rewind_and_agree() {
    let mut rs = ResultSet::new(MemorySource::new(orders()));

    // drain the cursor first; each materializer rewinds on its own
    while rs.fetch_row().is_some() {}

    match rs.fetch_all() {
        Fetched::Rows(rows) => assert_eq!(rows.len(), 4),
        other => panic!("expected rows, got {other:?}"),
    }
    match rs.fetch_pairs(Some("id"), Some("qty")).unwrap() {
        Pairs::Map(map) => {
            assert_eq!(map.len(), 4);
            assert_eq!(map.get(&Value::Int(4)), Some(&Value::Int(7)));
        }
        other => panic!("expected map, got {other:?}"),
    }
    let tree = rs.fetch_assoc("id").unwrap();
    assert_eq!(tree.len(), 4);
}

#[test]
fn iteration_interleaves_with_direct_fetches() {
    let mut rs = ResultSet::new(MemorySource::new(orders()));
    let first_two: Vec<Row> = rs.iter_bounded(0, 2).collect();
    assert_eq!(first_two.len(), 2);
    // the adapter advanced the shared cursor
    assert_eq!(rs.fetch_row().unwrap().get("id"), Some(&Value::Int(3)));
}

#[test]
fn release_runs_once_whether_explicit_or_scoped() {
    let mut rs = ResultSet::new(MemorySource::new(orders()));
    rs.release();
    rs.release();
    assert!(rs.fetch_row().is_none());
    // dropping after an explicit release must stay a no-op
    drop(rs);

    // scoped teardown alone also releases
    {
        let _rs = ResultSet::new(MemorySource::new(orders()));
    }
}

#[test]
fn empty_result_is_never_an_error() {
    let mut rs = ResultSet::new(MemorySource::new(Vec::new()));
    assert_eq!(rs.fetch_all(), Fetched::Rows(vec![]));
    assert!(matches!(rs.fetch_pairs(None, None), Ok(Pairs::Map(_))));
    assert!(matches!(rs.fetch_assoc("whatever"), Ok(AssocTree::Map(_))));
    assert_eq!(rs.iter().count(), 0);
}

#[test]
fn seekless_source_materializes_the_remainder() {
    /// A wrapper that refuses every seek, as a forward-only driver would.
    struct NoSeek(MemorySource);

    impl RowSource for NoSeek {
        fn seek(&mut self, _position: usize) -> bool {
            false
        }
        fn row_count(&self) -> usize {
            self.0.row_count()
        }
        fn fetch_next(&mut self) -> Option<Row> {
            self.0.fetch_next()
        }
        fn release(&mut self) {
            self.0.release();
        }
        fn discover_columns(&self) -> Vec<ColumnMeta> {
            self.0.discover_columns()
        }
    }

    let mut rs = ResultSet::new(NoSeek(MemorySource::new(orders())));
    rs.fetch_row().unwrap();

    // rewind is refused, so only the remaining three rows materialize
    match rs.fetch_all() {
        Fetched::Rows(rows) => {
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].get("id"), Some(&Value::Int(2)));
        }
        other => panic!("expected rows, got {other:?}"),
    }

    // offset falls back to fetch-and-discard
    let mut rs = ResultSet::new(NoSeek(MemorySource::new(orders())));
    let ids: Vec<_> = rs
        .iter_bounded(1, 2)
        .map(|r| r.get("id").cloned().unwrap())
        .collect();
    assert_eq!(ids, vec![Value::Int(2), Value::Int(3)]);
}

#[test]
fn conversion_table_survives_all_materializers() {
    let mut rs = ResultSet::new(MemorySource::new(vec![
        Row::from_pairs([("id", Value::Str("1".into())), ("n", Value::Str("x".into()))]),
        Row::from_pairs([("id", Value::Str("2".into())), ("n", Value::Str("y".into()))]),
    ]));
    rs.set_type("id", TypeTag::Integer);

    match rs.fetch_pairs(None, None).unwrap() {
        Pairs::Map(map) => {
            assert_eq!(map.get(&Value::Int(1)), Some(&Value::Str("x".into())));
        }
        other => panic!("expected map, got {other:?}"),
    }
    let tree = rs.fetch_assoc("id").unwrap();
    assert!(tree.get(&Value::Int(2)).is_some());
}
