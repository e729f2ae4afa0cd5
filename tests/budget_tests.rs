// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal_macros::dec;
use tally::aggregate::budget_status;
use tally::commands::reports;
use tally::db::MemoryKv;
use tally::models::TxKind;
use tally::session::{NewTransaction, Session};

fn spend(s: &mut Session<MemoryKv>, amount: &str, category: &str, date: &str) {
    s.add_transaction(NewTransaction {
        amount,
        kind: TxKind::Expense,
        category,
        date: Some(date),
        note: None,
    })
    .unwrap();
}

fn setup() -> Session<MemoryKv> {
    let mut s = Session::load(MemoryKv::new());
    s.set_budget("Dining", "50.00").unwrap();
    s.set_budget("Travel", "200").unwrap();
    spend(&mut s, "32.5", "Dining", "2025-08-03");
    spend(&mut s, "27.5", "Dining", "2025-08-21");
    spend(&mut s, "15", "Dining", "2025-07-30");
    spend(&mut s, "120", "Travel", "2025-08-11");
    s
}

#[test]
fn budget_status_flags_overspend_for_month() {
    let s = setup();
    let lines = budget_status(s.budgets(), s.transactions(), Some("2025-08"));
    assert_eq!(lines.len(), 2);
    let dining = &lines[0];
    assert_eq!(dining.category, "Dining");
    assert_eq!(format!("{:.2}", dining.spent), "60.00");
    assert_eq!(format!("{:.2}", dining.remaining), "-10.00");
    assert!(dining.over);
    assert!(!lines[1].over);
    assert_eq!(lines[1].remaining, dec!(80));
}

#[test]
fn budget_status_without_month_counts_everything() {
    let s = setup();
    let lines = budget_status(s.budgets(), s.transactions(), None);
    assert_eq!(lines[0].spent, dec!(75));
}

#[test]
fn budget_rejects_bad_input() {
    let mut s = setup();
    assert!(s.set_budget("", "10").is_err());
    assert!(s.set_budget("Dining", "lots").is_err());
    assert!(s.set_budget("Dining", "-1").is_err());
    assert_eq!(s.budgets()["Dining"], dec!(50.00));
    assert!(s.remove_budget("Travel"));
    assert!(!s.remove_budget("Travel"));
}

#[test]
fn category_and_trend_reports() {
    let s = setup();
    let rows = reports::category_rows(&s, TxKind::Expense, Some("2025-08"));
    assert_eq!(
        rows,
        vec![("Travel".to_string(), dec!(120)), ("Dining".to_string(), dec!(60.0))]
    );
    assert!(reports::category_rows(&s, TxKind::Income, None).is_empty());

    let trend = reports::trend_rows(&s, 1);
    assert_eq!(trend, vec![("2025-08".to_string(), dec!(180.0))]);
    let trend = reports::trend_rows(&s, 6);
    assert_eq!(trend[0], ("2025-07".to_string(), dec!(15)));
}
