// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal_macros::dec;
use tally::db::MemoryKv;
use tally::session::Session;
use tally::{cli, commands::cart};

fn run(session: &mut Session<MemoryKv>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["tally", "cart"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("cart", cart_m)) = matches.subcommand() {
        cart::handle(session, cart_m)
    } else {
        panic!("no cart subcommand");
    }
}

#[test]
fn add_set_and_list_through_cli() {
    let mut s = Session::load(MemoryKv::new());
    run(&mut s, &["add", "--product", "1", "--quantity", "2"]).unwrap();
    run(&mut s, &["add", "--product", "10"]).unwrap();
    run(&mut s, &["add", "--product", "10", "--quantity", "-4"]).unwrap();

    let rows = cart::cart_rows(&s);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line_total, "1998.00");
    assert_eq!(rows[1].quantity, 1);
    assert_eq!(s.cart_total(), dec!(2047));

    run(&mut s, &["set", "--product", "1", "--quantity", "-1"]).unwrap();
    let rows = cart::cart_rows(&s);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "10");
}

#[test]
fn unknown_product_is_an_error() {
    let mut s = Session::load(MemoryKv::new());
    assert!(run(&mut s, &["add", "--product", "999"]).is_err());
    assert!(s.cart().is_empty());
}

#[test]
fn checkout_through_cli() {
    let mut s = Session::load(MemoryKv::new());
    assert!(run(&mut s, &["checkout", "--address", "1 Main St"]).is_err());

    run(&mut s, &["add", "--product", "3", "--quantity", "3"]).unwrap();
    run(&mut s, &["checkout", "--address", "1 Main St", "--method", "Express"]).unwrap();
    assert!(s.cart().is_empty());
    let order = &s.orders()[0];
    assert_eq!(order.total, dec!(297));
    assert_eq!(order.shipping.method, "Express");
    assert_eq!(order.payment_method, "Credit Card");
}
