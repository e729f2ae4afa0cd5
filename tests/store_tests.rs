// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally::aggregate::{grand_total, line_total};
use tally::models::LineItem;
use tally::store::LineItemStore;

fn item(id: &str, price: Decimal) -> LineItem {
    LineItem {
        id: id.to_string(),
        title: format!("Item {}", id),
        unit_price: price,
        quantity: 0,
        category: "misc".to_string(),
        added_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, i64),
    Set(u8, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..5, -3i64..6).prop_map(|(id, q)| Op::Add(id, q)),
        (0u8..5, -3i64..6).prop_map(|(id, q)| Op::Set(id, q)),
    ]
}

fn price_for(id: u8) -> Decimal {
    Decimal::new(i64::from(id) * 125 + 99, 2)
}

proptest! {
    #[test]
    fn store_never_holds_non_positive_quantities(ops in proptest::collection::vec(op(), 0..60)) {
        let mut store = LineItemStore::new();
        for op in ops {
            match op {
                Op::Add(id, q) => { store.add(item(&id.to_string(), price_for(id)), q); }
                Op::Set(id, q) => { store.set_quantity(&id.to_string(), q); }
            }
            prop_assert!(store.items().iter().all(|i| i.quantity > 0));
            let mut ids: Vec<_> = store.items().iter().map(|i| i.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), store.len());
        }
    }

    #[test]
    fn grand_total_ignores_insertion_order(
        entries in proptest::collection::vec((0u8..8, 1i64..20), 1..20),
        seed in any::<u64>(),
    ) {
        let mut forward = LineItemStore::new();
        for (id, q) in &entries {
            forward.add(item(&id.to_string(), price_for(*id)), *q);
        }

        let mut shuffled = entries.clone();
        // Deterministic rotation plus reversal stands in for a permutation.
        let k = (seed as usize) % shuffled.len();
        shuffled.rotate_left(k);
        shuffled.reverse();
        let mut backward = LineItemStore::new();
        for (id, q) in &shuffled {
            backward.add(item(&id.to_string(), price_for(*id)), *q);
        }

        let expected: Decimal = forward
            .items()
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();
        prop_assert_eq!(grand_total(forward.items()), expected);
        prop_assert_eq!(grand_total(forward.items()), grand_total(backward.items()));
    }
}

#[test]
fn repeated_add_merges_quantities() {
    let mut store = LineItemStore::new();
    store.add(item("x", dec!(3)), 2);
    store.add(item("x", dec!(3)), 5);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("x").unwrap().quantity, 7);
}

#[test]
fn set_quantity_zero_removes_only_that_entry() {
    let mut store = LineItemStore::new();
    store.add(item("1", dec!(10)), 2);
    store.add(item("2", dec!(5)), 1);
    store.add(item("3", dec!(1)), 4);
    assert!(store.set_quantity("2", 0));
    let ids: Vec<_> = store.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn worked_example_totals() {
    let mut store = LineItemStore::new();
    store.add(item("1", dec!(10)), 2);
    store.add(item("2", dec!(5)), 1);
    assert_eq!(grand_total(store.items()), dec!(25));
    assert_eq!(line_total(store.get("1").unwrap()), dec!(20));

    store.set_quantity("1", 0);
    assert_eq!(store.len(), 1);
    assert_eq!(store.items()[0].id, "2");
    assert_eq!(store.items()[0].quantity, 1);
    assert_eq!(grand_total(store.items()), dec!(5));
}

#[test]
fn snapshot_and_clear_twice() {
    let mut store = LineItemStore::new();
    store.add(item("1", dec!(10)), 2);
    store.add(item("2", dec!(5)), 1);
    let before = store.items().to_vec();

    let first = store.snapshot_and_clear();
    assert_eq!(first, before);
    assert!(store.is_empty());

    let second = store.snapshot_and_clear();
    assert!(second.is_empty());
}

#[test]
fn store_serializes_as_plain_list_and_repairs_on_load() {
    let mut store = LineItemStore::new();
    store.add(item("1", dec!(10)), 2);
    let json = serde_json::to_value(&store).unwrap();
    assert!(json.is_array());

    let raw = r#"[
        {"id":"1","title":"A","unit_price":"10","quantity":0,"category":"c","added_on":"2025-01-01"},
        {"id":"2","title":"B","unit_price":"2.5","quantity":3,"category":"c","added_on":"2025-01-01"}
    ]"#;
    let loaded: LineItemStore = serde_json::from_str(raw).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(grand_total(loaded.items()), dec!(7.5));
}
