// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

fn quantity_arg() -> Arg {
    arg!(--quantity <N> "Quantity")
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .default_value("1")
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help("income or expense")
        .value_parser(["income", "expense"])
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Cart, orders, bookings and expense ledger with derived totals")
        .version(clap::crate_version!())
        .arg(
            arg!(--db <PATH> "Database file (defaults to the platform data dir)")
                .env("TALLY_DB")
                .global(true),
        )
        .arg(
            arg!(-v --verbose "Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the database and print its path"))
        .subcommand(
            Command::new("catalog")
                .about("Product catalog")
                .subcommand(
                    Command::new("fetch")
                        .about("Download the catalog and cache it")
                        .arg(arg!(--url <URL> "Catalog endpoint; saved for next time")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List cached products")
                        .arg(arg!(--search <TEXT> "Only titles containing TEXT (any case)")),
                )),
        )
        .subcommand(
            Command::new("cart")
                .about("Shopping cart")
                .subcommand(
                    Command::new("add")
                        .about("Add a product to the cart")
                        .arg(arg!(--product <ID> "Product id").required(true))
                        .arg(quantity_arg()),
                )
                .subcommand(
                    Command::new("set")
                        .about("Set a cart line's quantity (0 or less removes it)")
                        .arg(arg!(--product <ID> "Product id").required(true))
                        .arg(
                            arg!(--quantity <N> "New quantity")
                                .value_parser(value_parser!(i64))
                                .allow_negative_numbers(true)
                                .required(true),
                        ),
                )
                .subcommand(json_args(Command::new("list").about("Show the cart and total")))
                .subcommand(Command::new("clear").about("Empty the cart"))
                .subcommand(
                    Command::new("checkout")
                        .about("Place an order from the whole cart")
                        .arg(arg!(--address <ADDRESS> "Delivery address").required(true))
                        .arg(arg!(--method <METHOD> "Shipping method").default_value("Standard"))
                        .arg(
                            arg!(--payment <METHOD> "Payment method")
                                .default_value("Credit Card"),
                        ),
                ),
        )
        .subcommand(
            Command::new("orders")
                .about("Order history")
                .subcommand(json_args(Command::new("list").about("List placed orders"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense ledger")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(arg!(--amount <AMOUNT> "Amount, non-negative").required(true))
                        .arg(arg!(--category <CATEGORY> "Category").required(true))
                        .arg(kind_arg().default_value("expense"))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today"))
                        .arg(arg!(--note <NOTE> "Free-form note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(arg!(--month <MONTH> "YYYY-MM"))
                        .arg(arg!(--category <CATEGORY> "Only this category"))
                        .arg(kind_arg())
                        .arg(arg!(--limit <N> "Max rows").value_parser(value_parser!(usize))),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived totals")
                .subcommand(json_args(
                    Command::new("summary").about("Income, expenses and balance"),
                ))
                .subcommand(json_args(
                    Command::new("by-category")
                        .about("Totals per category")
                        .arg(kind_arg().default_value("expense"))
                        .arg(arg!(--month <MONTH> "YYYY-MM")),
                ))
                .subcommand(json_args(
                    Command::new("trend")
                        .about("Monthly expense totals")
                        .arg(
                            arg!(--months <N> "Number of recent months")
                                .value_parser(value_parser!(usize))
                                .default_value("6"),
                        ),
                ))
                .subcommand(json_args(Command::new("cart").about("Cart totals by category"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Category spending limits")
                .subcommand(
                    Command::new("set")
                        .about("Set the limit for a category")
                        .arg(arg!(--category <CATEGORY> "Category").required(true))
                        .arg(arg!(--limit <AMOUNT> "Limit").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category limit")
                        .arg(arg!(--category <CATEGORY> "Category").required(true)),
                )
                .subcommand(Command::new("list").about("List limits"))
                .subcommand(json_args(
                    Command::new("status")
                        .about("Spent vs limit per category")
                        .arg(arg!(--month <MONTH> "YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("events")
                .about("Bookable movies, events and trips")
                .subcommand(json_args(
                    Command::new("list")
                        .about("List bookable items")
                        .arg(arg!(--search <TEXT> "Only titles containing TEXT (any case)"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("all, movie, event or travel")
                                .value_parser(["all", "movie", "event", "travel"])
                                .ignore_case(true)
                                .default_value("all"),
                        ),
                )),
        )
        .subcommand(
            Command::new("book")
                .about("Book tickets")
                .arg(arg!(--event <ID> "Event id").required(true))
                .arg(quantity_arg())
                .arg(arg!(--code <CODE> "Discount code")),
        )
        .subcommand(
            Command::new("bookings")
                .about("Booking history")
                .subcommand(json_args(Command::new("list").about("List bookings"))),
        )
        .subcommand(
            Command::new("discount")
                .about("Discount codes")
                .subcommand(
                    Command::new("set")
                        .about("Add or update a code")
                        .arg(arg!(--code <CODE> "Code").required(true))
                        .arg(arg!(--rate <RATE> "Fraction between 0 and 1").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a code")
                        .arg(arg!(--code <CODE> "Code").required(true)),
                )
                .subcommand(Command::new("list").about("List codes")),
        )
        .subcommand(
            Command::new("profile")
                .about("User profile and display settings")
                .subcommand(Command::new("show").about("Show profile and settings"))
                .subcommand(
                    Command::new("set")
                        .about("Update profile fields")
                        .arg(arg!(--name <NAME> "Display name"))
                        .arg(arg!(--email <EMAIL> "Email"))
                        .arg(arg!(--currency <CCY> "Display currency code")),
                )
                .subcommand(Command::new("theme").about("Toggle light/dark theme")),
        )
        .subcommand(
            Command::new("activity")
                .about("Recent activity")
                .arg(
                    arg!(--limit <N> "Max entries")
                        .value_parser(value_parser!(usize))
                        .default_value("20"),
                )
                .subcommand(
                    Command::new("capacity")
                        .about("Set how many entries are kept")
                        .arg(
                            arg!(--set <N> "New capacity")
                                .value_parser(value_parser!(usize))
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export the ledger")
                        .arg(
                            arg!(--format <FORMAT> "csv or json")
                                .default_value("csv"),
                        )
                        .arg(arg!(--out <PATH> "Output file").required(true)),
                ),
        )
}
