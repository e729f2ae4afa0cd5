// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    by_category, by_category_where, by_period, month_key, recent_periods, summarize,
};
use crate::db::KvStore;
use crate::models::TxKind;
use crate::session::Session;
use crate::utils::{arg_str, fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle<K: KvStore>(session: &Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("by-category", sub)) => spend_by_category(session, sub)?,
        Some(("trend", sub)) => trend(session, sub)?,
        Some(("cart", sub)) => cart(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let s = summarize(session.transactions());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = session.currency();
    let data = vec![
        vec!["Income".to_string(), fmt_money(&s.income, ccy)],
        vec!["Expenses".to_string(), fmt_money(&s.expenses, ccy)],
        vec!["Balance".to_string(), fmt_money(&s.balance, ccy)],
    ];
    println!("{}", pretty_table(&["", "Amount"], data));
    Ok(())
}

/// Category totals, largest first. Zero totals are left out.
pub fn category_rows<K: KvStore>(
    session: &Session<K>,
    kind: TxKind,
    month: Option<&str>,
) -> Vec<(String, Decimal)> {
    let agg = by_category_where(session.transactions(), |t| {
        t.kind == kind && month.is_none_or(|m| month_key(t.date) == m)
    });
    let mut items: Vec<_> = agg.into_iter().filter(|(_, v)| !v.is_zero()).collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

fn spend_by_category<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TxKind::parse(arg_str(sub, "type")?).unwrap_or(TxKind::Expense);
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let items = category_rows(session, kind, month.as_deref());
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let hdr = format!("Total ({})", session.currency());
        println!("{}", pretty_table(&["Category", &hdr], data));
    }
    Ok(())
}

/// Expense totals for the last `months` months that have any expenses,
/// oldest first.
pub fn trend_rows<K: KvStore>(session: &Session<K>, months: usize) -> Vec<(String, Decimal)> {
    let monthly = by_period(session.transactions(), |t| {
        (t.kind == TxKind::Expense).then(|| month_key(t.date))
    });
    recent_periods(monthly, months)
}

fn trend<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&6);
    let data: Vec<Vec<String>> = trend_rows(session, months)
        .into_iter()
        .map(|(m, v)| vec![m, format!("{:.2}", v)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Expenses"], data));
    }
    Ok(())
}

fn cart<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let mut items: Vec<_> = by_category(session.cart().items()).into_iter().collect();
    items.sort_by(|a, b| a.0.cmp(&b.0));
    let mut data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    data.push(vec![
        "Total".to_string(),
        format!("{:.2}", session.cart_total()),
    ]);
    println!("{}", pretty_table(&["Category", "Amount"], data));
    Ok(())
}
