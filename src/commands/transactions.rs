// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::month_key;
use crate::db::KvStore;
use crate::models::TxKind;
use crate::session::{NewTransaction, Session};
use crate::utils::{arg_str, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TxKind::parse(arg_str(sub, "type")?).unwrap_or(TxKind::Expense);
    let tx = session.add_transaction(NewTransaction {
        amount: arg_str(sub, "amount")?,
        kind,
        category: arg_str(sub, "category")?,
        date: sub.get_one::<String>("date").map(|s| s.as_str()),
        note: sub.get_one::<String>("note").map(|s| s.as_str()),
    })?;
    println!(
        "Recorded {} {} on {} ({})",
        tx.kind, tx.amount, tx.date, tx.category
    );
    Ok(())
}

fn list<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

/// Filtered ledger, newest date first. Same-day entries keep the order they
/// were recorded in, latest first.
pub fn query_rows<K: KvStore>(
    session: &Session<K>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let kind = sub
        .get_one::<String>("type")
        .and_then(|s| TxKind::parse(s));

    let mut txs: Vec<_> = session
        .transactions()
        .iter()
        .filter(|t| month.as_deref().is_none_or(|m| month_key(t.date) == m))
        .filter(|t| category.is_none_or(|c| t.category == c))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: t.amount.to_string(),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect())
}
