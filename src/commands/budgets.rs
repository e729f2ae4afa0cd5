// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::budget_status;
use crate::db::KvStore;
use crate::session::Session;
use crate::utils::{arg_str, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("rm", sub)) => {
            let cat = arg_str(sub, "category")?;
            if session.remove_budget(cat) {
                println!("Removed budget for '{}'", cat.trim());
            } else {
                println!("No budget set for '{}'", cat.trim());
            }
        }
        Some(("list", _)) => list(session),
        Some(("status", sub)) => status(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let cat = arg_str(sub, "category")?;
    let limit = arg_str(sub, "limit")?;
    session.set_budget(cat, limit)?;
    println!("Budget set for {} = {}", cat.trim(), limit.trim());
    Ok(())
}

fn list<K: KvStore>(session: &Session<K>) {
    let data = session
        .budgets()
        .iter()
        .map(|(c, a)| vec![c.clone(), format!("{:.2}", a)])
        .collect();
    let hdr = format!("Limit ({})", session.currency());
    println!("{}", pretty_table(&["Category", &hdr], data));
}

fn status<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let lines = budget_status(session.budgets(), session.transactions(), month.as_deref());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &lines)? {
        return Ok(());
    }
    let data = lines
        .into_iter()
        .map(|l| {
            vec![
                l.category,
                format!("{:.2}", l.limit),
                format!("{:.2}", l.spent),
                format!("{:.2}", l.remaining),
                if l.over { "OVER".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Spent", "Remaining", ""], data)
    );
    Ok(())
}
