//! Integration tests for cursor-backed foreign scans.
//!
//! These tests drive the wrapper's execution callbacks against an in-memory
//! bridge and check the cursor lifecycle seen from the bridge side.


use cursor_fdw::bridge::MemoryBridge;
use cursor_fdw::datum::Value;
use cursor_fdw::executor::ForeignScanNode;
use cursor_fdw::expr::{CompareOp, Expr};
use cursor_fdw::fdw::{CursorFdw, ForeignDataWrapper};
use cursor_fdw::planner::RestrictInfo;
use cursor_fdw::scan::{ExecFlags, TupleSlot};
use proptest::prelude::*;

use fdw_test_support::{Fixture, id_of};

#[test]
fn test_three_rows_then_end_of_stream_and_rescan() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    let plan = fx.plan(vec![]);
    assert_eq!(plan.query, "SELECT * FROM public.items");

    let mut state = fdw
        .begin_foreign_scan(&plan, ExecFlags::NONE)
        .unwrap()
        .unwrap();
    let mut slot = TupleSlot::new(2);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let row = fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap();
        ids.push(id_of(row.unwrap().values()));
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap().is_none());

    // Rescan after the second row restarts at row 1
    fdw.rescan_foreign_scan(&mut state).unwrap();
    for expected in [1, 2] {
        let row = fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap();
        assert_eq!(id_of(row.unwrap().values()), expected);
    }
    fdw.rescan_foreign_scan(&mut state).unwrap();
    let row = fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap();
    assert_eq!(id_of(row.unwrap().values()), 1);

    fdw.end_foreign_scan(&mut state).unwrap();
    assert_eq!(fx.bridge.open_cursor_count(), 0);
    fx.assert_sessions_balanced();
}

#[test]
fn test_exhaustion_is_sticky() {
    let fx = Fixture::with_rows(2);
    let fdw = fx.fdw();
    let plan = fx.plan(vec![]);
    let mut state = fdw
        .begin_foreign_scan(&plan, ExecFlags::NONE)
        .unwrap()
        .unwrap();
    let mut slot = TupleSlot::new(2);

    while fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap().is_some() {}
    // Rows inserted after the cursor opened are not visible to it
    fx.bridge
        .insert_rows("public", "items", vec![vec![Value::Int32(9), Value::Null]])
        .unwrap();
    for _ in 0..5 {
        assert!(fdw.iterate_foreign_scan(&mut state, &mut slot).unwrap().is_none());
        assert!(slot.is_empty());
    }
    fdw.end_foreign_scan(&mut state).unwrap();
}

#[test]
fn test_handles_are_isolated() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    let plan = fx.plan(vec![]);

    let mut a = fdw.begin_foreign_scan(&plan, ExecFlags::NONE).unwrap().unwrap();
    let mut b = fdw.begin_foreign_scan(&plan, ExecFlags::NONE).unwrap().unwrap();
    assert_ne!(a.cursor(), b.cursor());

    let mut slot = TupleSlot::new(2);
    let row = fdw.iterate_foreign_scan(&mut a, &mut slot).unwrap();
    assert_eq!(id_of(row.unwrap().values()), 1);

    fdw.end_foreign_scan(&mut a).unwrap();
    assert!(a.cursor().is_none());

    let mut ids = Vec::new();
    while let Some(row) = fdw.iterate_foreign_scan(&mut b, &mut slot).unwrap() {
        ids.push(id_of(row.values()));
    }
    assert_eq!(ids, vec![1, 2, 3]);
    fdw.end_foreign_scan(&mut b).unwrap();
    fx.assert_sessions_balanced();
}

#[test]
fn test_node_rechecks_local_quals() {
    let fx = Fixture::with_rows(5);
    let fdw = fx.fdw();
    let qual = Expr::compare(
        Expr::column(0, "id"),
        CompareOp::GtEq,
        Expr::Const(Value::Int32(4)),
    );
    let plan = fx.plan(vec![RestrictInfo::new(qual.clone(), 0.4)]);
    assert_eq!(plan.query, "SELECT * FROM public.items");
    assert_eq!(plan.local_quals, vec![qual]);

    let mut node = ForeignScanNode::begin(&fdw, plan, ExecFlags::NONE, 2).unwrap();
    let mut ids = Vec::new();
    while let Some(row) = node.next().unwrap() {
        ids.push(id_of(&row));
    }
    assert_eq!(ids, vec![4, 5]);
    node.end().unwrap();
    node.end().unwrap();
    assert!(!node.is_active());
    assert_eq!(fx.bridge.open_cursor_count(), 0);
}

#[test]
fn test_node_rescan() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    let mut node = ForeignScanNode::begin(&fdw, fx.plan(vec![]), ExecFlags::REWIND, 2).unwrap();

    assert_eq!(id_of(&node.next().unwrap().unwrap()), 1);
    assert_eq!(id_of(&node.next().unwrap().unwrap()), 2);
    node.rescan().unwrap();
    assert_eq!(id_of(&node.next().unwrap().unwrap()), 1);
    node.end().unwrap();
}

#[test]
fn test_explain_only_opens_no_cursor() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    let mut node =
        ForeignScanNode::begin(&fdw, fx.plan(vec![]), ExecFlags::EXPLAIN_ONLY, 2).unwrap();

    assert!(!node.is_active());
    assert_eq!(node.next().unwrap(), None);
    node.end().unwrap();
    assert_eq!(fx.bridge.stats().cursors_opened, 0);
    assert_eq!(fx.bridge.stats().connects, 0);
}

#[test]
fn test_dropping_node_closes_cursor() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    {
        let mut node = ForeignScanNode::begin(&fdw, fx.plan(vec![]), ExecFlags::NONE, 2).unwrap();
        node.next().unwrap();
        assert_eq!(fx.bridge.open_cursor_count(), 1);
        // Dropped without end(), as on an aborted query
    }
    assert_eq!(fx.bridge.open_cursor_count(), 0);
    assert_eq!(fx.bridge.stats().cursors_closed, 1);
    fx.assert_sessions_balanced();
}

#[test]
fn test_cursor_lost_at_transaction_end() {
    let fx = Fixture::with_rows(3);
    let fdw = fx.fdw();
    let mut node = ForeignScanNode::begin(&fdw, fx.plan(vec![]), ExecFlags::NONE, 2).unwrap();
    assert!(node.next().unwrap().is_some());

    fx.bridge.end_transaction();
    assert_eq!(node.next().unwrap(), None);
    assert_eq!(node.next().unwrap(), None);

    // A rescan opens a fresh cursor
    node.rescan().unwrap();
    assert_eq!(id_of(&node.next().unwrap().unwrap()), 1);
    node.end().unwrap();
}

fn drain(node: &mut ForeignScanNode<'_, CursorFdw<'_, MemoryBridge>>) -> Vec<i32> {
    let mut ids = Vec::new();
    while let Some(row) = node.next().unwrap() {
        ids.push(id_of(&row));
    }
    ids
}

proptest! {
    #[test]
    fn prop_rescan_yields_fresh_sequence(
        rows in 0i32..8,
        stops in proptest::collection::vec(0usize..10, 1..5),
    ) {
        let fx = Fixture::with_rows(rows);
        let fdw = fx.fdw();
        let plan = fx.plan(vec![]);

        let mut fresh = ForeignScanNode::begin(&fdw, plan.clone(), ExecFlags::NONE, 2).unwrap();
        let expected = drain(&mut fresh);
        fresh.end().unwrap();

        let mut node = ForeignScanNode::begin(&fdw, plan, ExecFlags::REWIND, 2).unwrap();
        for stop in stops {
            for _ in 0..stop {
                node.next().unwrap();
            }
            node.rescan().unwrap();
        }
        prop_assert_eq!(drain(&mut node), expected);
        node.end().unwrap();

        prop_assert_eq!(fx.bridge.open_cursor_count(), 0);
        prop_assert_eq!(fx.bridge.session_depth(), 0);
    }
}
