// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::line_total;
use crate::catalog;
use crate::db::KvStore;
use crate::models::Shipping;
use crate::session::Session;
use crate::utils::{arg_str, fmt_money, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("set", sub)) => set(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("clear", _)) => {
            session.clear_cart();
            println!("Cart cleared");
        }
        Some(("checkout", sub)) => checkout(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_str(sub, "product")?.trim();
    let qty = *sub.get_one::<i64>("quantity").unwrap_or(&1);
    let product = catalog::find(session.products(), id)
        .cloned()
        .ok_or_else(|| anyhow!("Product '{}' not found; try `tally catalog list`", id))?;
    if session.add_to_cart(&product, qty) {
        println!(
            "Added {} x {} ({} in cart)",
            qty,
            product.title,
            session.cart().get(id).map(|i| i.quantity).unwrap_or_default()
        );
    } else {
        println!("Nothing added: quantity must be positive");
    }
    Ok(())
}

fn set<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_str(sub, "product")?.trim();
    let qty = *sub
        .get_one::<i64>("quantity")
        .ok_or_else(|| anyhow!("Missing --quantity"))?;
    if !session.set_cart_quantity(id, qty) {
        println!("'{}' is not in the cart", id);
    } else if qty <= 0 {
        println!("Removed '{}' from the cart", id);
    } else {
        println!("'{}' quantity set to {}", id, qty);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CartRow {
    pub id: String,
    pub title: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

pub fn cart_rows<K: KvStore>(session: &Session<K>) -> Vec<CartRow> {
    session
        .cart()
        .items()
        .iter()
        .map(|i| CartRow {
            id: i.id.clone(),
            title: i.title.clone(),
            unit_price: format!("{:.2}", i.unit_price),
            quantity: i.quantity,
            line_total: format!("{:.2}", line_total(i)),
        })
        .collect()
}

fn list<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let rows = cart_rows(session);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }
    let data = rows
        .into_iter()
        .map(|r| {
            vec![
                r.id,
                r.title,
                r.unit_price,
                r.quantity.to_string(),
                r.line_total,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Item", "Price", "Qty", "Line Total"], data)
    );
    println!(
        "Total: {}",
        fmt_money(&session.cart_total(), session.currency())
    );
    Ok(())
}

fn checkout<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let shipping = Shipping {
        address: arg_str(sub, "address")?.to_string(),
        method: arg_str(sub, "method")?.trim().to_string(),
    };
    let payment = arg_str(sub, "payment")?.trim().to_string();
    let order = session.checkout(shipping, &payment)?;
    println!(
        "Order {} placed: {} item(s), total {}, shipping to {}",
        order.id,
        order.items.len(),
        fmt_money(&order.total, session.currency()),
        order.shipping.address
    );
    Ok(())
}
