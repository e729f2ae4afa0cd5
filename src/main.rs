// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tally::{cli, commands, db, session::Session};

fn init_logging(verbose: bool) {
    let default = if verbose { "tally=debug" } else { "tally=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let (kv, path) = db::open_or_init(db_override.as_deref())?;
    let mut session = Session::load(kv);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("catalog", sub)) => commands::catalog::handle(&mut session, sub)?,
        Some(("cart", sub)) => commands::cart::handle(&mut session, sub)?,
        Some(("orders", sub)) => commands::orders::handle(&session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("events", sub)) => commands::booking::handle_events(sub)?,
        Some(("book", sub)) => commands::booking::handle_book(&mut session, sub)?,
        Some(("bookings", sub)) => commands::booking::handle_bookings(&session, sub)?,
        Some(("discount", sub)) => commands::discounts::handle(&mut session, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut session, sub)?,
        Some(("activity", sub)) => commands::activity::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
