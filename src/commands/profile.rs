// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(session),
        Some(("set", sub)) => {
            let name = sub.get_one::<String>("name").map(|s| s.as_str());
            let email = sub.get_one::<String>("email").map(|s| s.as_str());
            if name.is_some() || email.is_some() {
                session.update_profile(name, email)?;
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                session.set_currency(ccy)?;
            }
            show(session);
        }
        Some(("theme", _)) => {
            let t = session.toggle_theme();
            println!("Theme set to {}", t);
        }
        _ => {}
    }
    Ok(())
}

fn show<K: KvStore>(session: &Session<K>) {
    let p = session.profile();
    let data = vec![
        vec!["Name".to_string(), p.name.clone()],
        vec!["Email".to_string(), p.email.clone()],
        vec!["Theme".to_string(), session.theme().to_string()],
        vec!["Currency".to_string(), session.currency().to_string()],
        vec!["Catalog URL".to_string(), session.catalog_url().to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], data));
}
