// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<K: KvStore>(session: &Session<K>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(session, sub)?;
    }
    Ok(())
}

fn list<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let orders = session.orders();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &orders)? {
        return Ok(());
    }
    let data = orders
        .iter()
        .rev()
        .map(|o| {
            let items = o
                .items
                .iter()
                .map(|i| format!("{} ({})", i.title, i.quantity))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                o.id.clone(),
                o.placed_at.format("%Y-%m-%d %H:%M").to_string(),
                items,
                format!("{:.2}", o.total),
                format!("{:?}", o.status),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Order", "Placed", "Items", "Total", "Status"], data)
    );
    Ok(())
}
