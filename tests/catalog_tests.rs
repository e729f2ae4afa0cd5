// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tally::catalog;
use tally::cli;
use tally::commands::booking;
use tally::models::EventKind;

#[test]
fn events_list_accepts_search_and_type_in_any_case() {
    let matches = cli::build_cli().get_matches_from([
        "tally", "events", "list", "--type", "MOVIE", "--search", "neon",
    ]);
    let (_, events_m) = matches.subcommand().unwrap();
    let (_, list_m) = events_m.subcommand().unwrap();
    let kind = list_m
        .get_one::<String>("type")
        .and_then(|t| EventKind::parse(t));
    let query = list_m.get_one::<String>("search").unwrap();
    let hits = catalog::filter_events(query, kind);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Neon Shadows");

    booking::handle_events(events_m).unwrap();
}

#[test]
fn events_list_defaults_to_all_kinds() {
    let matches = cli::build_cli().get_matches_from(["tally", "events", "list"]);
    let (_, events_m) = matches.subcommand().unwrap();
    let (_, list_m) = events_m.subcommand().unwrap();
    let kind = list_m
        .get_one::<String>("type")
        .and_then(|t| EventKind::parse(t));
    assert_eq!(kind, None);
    assert_eq!(catalog::filter_events("", kind).len(), 6);
}

#[test]
fn events_list_rejects_unknown_type() {
    let res = cli::build_cli().try_get_matches_from(["tally", "events", "list", "--type", "concert"]);
    assert!(res.is_err());
}

#[test]
fn catalog_search_over_cached_products() {
    let products = catalog::builtin_products();
    let hits = catalog::search(&products, "MOUSE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "10");
}
