// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::filter_events;
use crate::db::KvStore;
use crate::models::EventKind;
use crate::session::Session;
use crate::utils::{arg_str, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle_events(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let query = sub.get_one::<String>("search").map_or("", |s| s.as_str());
        let kind = sub
            .get_one::<String>("type")
            .and_then(|t| EventKind::parse(t));
        let events = filter_events(query, kind);
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &events)? {
            let data = events
                .into_iter()
                .map(|e| {
                    vec![
                        e.id,
                        format!("{:?}", e.kind),
                        e.title,
                        format!("{:.2}", e.price),
                        e.description,
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "Type", "Title", "Price", "About"], data)
            );
        }
    }
    Ok(())
}

pub fn handle_book<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    let event = arg_str(m, "event")?;
    let qty = *m.get_one::<i64>("quantity").unwrap_or(&1);
    let code = m.get_one::<String>("code").map(|s| s.as_str());
    let b = session.book(event, qty, code)?;
    let ccy = session.currency().to_string();
    println!("Booked {} x {} ({})", b.quantity, b.title, b.id);
    println!("Subtotal: {}", fmt_money(&b.subtotal, &ccy));
    match &b.discount_code {
        Some(c) => println!("Discount ({}): -{}", c, fmt_money(&b.discount, &ccy)),
        None if code.is_some_and(|c| !c.trim().is_empty()) => {
            println!("Discount code not recognised, no discount applied")
        }
        None => println!("No discount"),
    }
    println!("Total: {}", fmt_money(&b.total, &ccy));
    Ok(())
}

pub fn handle_bookings<K: KvStore>(session: &Session<K>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let bookings = session.bookings();
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bookings)? {
            let data = bookings
                .iter()
                .map(|b| {
                    vec![
                        b.id.clone(),
                        b.title.clone(),
                        b.quantity.to_string(),
                        format!("{:.2}", b.total),
                        format!("{:?}", b.status),
                        b.booked_at.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "Title", "Qty", "Total", "Status", "Booked"], data)
            );
        }
    }
    Ok(())
}
