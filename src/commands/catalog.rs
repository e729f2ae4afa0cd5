// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::db::KvStore;
use crate::session::Session;
use crate::utils::{http_client, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", sub)) => fetch(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn fetch<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(url) = sub.get_one::<String>("url") {
        session.set_catalog_url(url)?;
    }
    let url = session.catalog_url().to_string();
    let client = http_client()?;
    let products = catalog::fetch(&client, &url)?;
    session.cache_catalog(products);
    println!("Fetched {} products from {}", session.products().len(), url);
    Ok(())
}

fn list<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let query = sub.get_one::<String>("search").map_or("", |s| s.as_str());
    let products = catalog::search(session.products(), query);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &products)? {
        return Ok(());
    }
    let data = products
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.title.clone(),
                p.category.clone(),
                format!("{:.2}", p.price),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Title", "Category", "Price"], data)
    );
    Ok(())
}
