// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tally::db::MemoryKv;
use tally::models::TxKind;
use tally::session::{NewTransaction, Session};
use tally::{cli, commands::transactions};

fn setup() -> Session<MemoryKv> {
    let mut s = Session::load(MemoryKv::new());
    for (i, cat) in [(1, "Food"), (3, "Food"), (2, "Rent")] {
        let date = format!("2025-01-0{}", i);
        s.add_transaction(NewTransaction {
            amount: "10",
            kind: TxKind::Expense,
            category: cat,
            date: Some(date.as_str()),
            note: None,
        })
        .unwrap();
    }
    s.add_transaction(NewTransaction {
        amount: "500",
        kind: TxKind::Income,
        category: "Salary",
        date: Some("2025-02-01"),
        note: Some("Jan pay"),
    })
    .unwrap();
    s
}

fn list_rows(session: &Session<MemoryKv>, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["tally", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            transactions::query_rows(session, list_m).unwrap()
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected() {
    let s = setup();
    let rows = list_rows(&s, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
    assert_eq!(rows[1].date, "2025-01-03");
}

#[test]
fn list_filters_combine() {
    let s = setup();
    let rows = list_rows(&s, &["--month", "2025-01", "--category", "Food"]);
    let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2025-01-03", "2025-01-01"]);

    let rows = list_rows(&s, &["--type", "income"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].note, "Jan pay");
    assert_eq!(rows[0].kind, "income");
}

#[test]
fn list_rejects_malformed_month() {
    let s = setup();
    let matches = cli::build_cli().get_matches_from(["tally", "tx", "list", "--month", "Jan"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&s, list_m).is_err());
}
