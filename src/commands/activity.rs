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
    if let Some(("capacity", sub)) = m.subcommand() {
        let n = *sub.get_one::<usize>("set").unwrap_or(&crate::activity::DEFAULT_CAPACITY);
        session.set_log_capacity(n);
        println!("Keeping the last {} activity entries", session.activity().capacity());
        return Ok(());
    }
    let limit = *m.get_one::<usize>("limit").unwrap_or(&20);
    let data: Vec<Vec<String>> = session
        .activity()
        .iter()
        .take(limit)
        .map(|e| vec![e.at.format("%Y-%m-%d %H:%M:%S").to_string(), e.message.clone()])
        .collect();
    if data.is_empty() {
        println!("No activity yet");
    } else {
        println!("{}", pretty_table(&["When", "What"], data));
    }
    Ok(())
}
