// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::session::Session;
use crate::utils::{arg_str, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let code = arg_str(sub, "code")?;
            session.set_discount(code, arg_str(sub, "rate")?)?;
            println!("Discount code {} saved", code.trim());
        }
        Some(("rm", sub)) => {
            let code = arg_str(sub, "code")?.trim();
            if session.remove_discount(code) {
                println!("Removed discount code {}", code);
            } else {
                println!("Unknown discount code {}", code);
            }
        }
        Some(("list", _)) => {
            let data = session
                .discounts()
                .iter()
                .map(|(c, r)| {
                    let pct = (*r * Decimal::ONE_HUNDRED).normalize();
                    vec![c.clone(), format!("{}%", pct)]
                })
                .collect();
            println!("{}", pretty_table(&["Code", "Discount"], data));
        }
        _ => {}
    }
    Ok(())
}
