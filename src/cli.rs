// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn filter_args() -> Vec<Arg> {
    vec![
        Arg::new("from")
            .long("from")
            .help("Start date, inclusive (YYYY-MM-DD)"),
        Arg::new("to")
            .long("to")
            .help("End date, inclusive (YYYY-MM-DD)"),
        Arg::new("type")
            .long("type")
            .default_value("all")
            .help("income|expense|all"),
        Arg::new("category")
            .long("category")
            .default_value("all")
            .help("Category name or 'all'"),
        Arg::new("payment")
            .long("payment")
            .default_value("all")
            .help("pix|cash|card|transfer|all"),
        Arg::new("search")
            .long("search")
            .help("Substring match on description, pet, and client"),
    ]
}

fn output_args() -> Vec<Arg> {
    vec![
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("pawledger")
        .version(crate_version!())
        .about("Bookkeeping, inventory, and clients for pet-care shops")
        .arg(
            Arg::new("account")
                .long("account")
                .global(true)
                .help("Account scope; omit for the local ledger"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").default_value("income"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("payment").long("payment").default_value("pix"))
                        .arg(Arg::new("card").long("card").help("credit|debit, card payments only"))
                        .arg(Arg::new("client").long("client"))
                        .arg(Arg::new("pet").long("pet"))
                        .arg(Arg::new("staff").long("staff"))
                        .arg(
                            Arg::new("monthly")
                                .long("monthly")
                                .action(ArgAction::SetTrue)
                                .help("Repeat this transaction every month"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .args(filter_args())
                        .args(output_args())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (password-gated)")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                ),
        )
        .subcommand(
            Command::new("inv")
                .about("Manage inventory")
                .subcommand(
                    Command::new("add")
                        .about("Add an inventory item")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("qty").long("qty").default_value("0"))
                        .arg(Arg::new("min").long("min").default_value("0"))
                        .arg(Arg::new("price").long("price").default_value("0")),
                )
                .subcommand(Command::new("list").about("List items").args(output_args()))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an item")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("move")
                        .about("Record a stock movement")
                        .arg(Arg::new("item").long("item").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("in|out|adjust ('adjust' sets the absolute quantity)"),
                        )
                        .arg(Arg::new("qty").long("qty").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("movements")
                        .about("Show movement history")
                        .arg(Arg::new("item").long("item"))
                        .args(output_args()),
                ),
        )
        .subcommand(
            Command::new("client")
                .about("Manage the client list")
                .subcommand(
                    Command::new("add")
                        .about("Register a client")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(Command::new("list").about("List clients").args(output_args()))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a client")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Totals, breakdowns, best service, and the 6-month trend")
                .args(filter_args())
                .args(output_args()),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export filtered transactions")
                    .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                    .arg(Arg::new("out").long("out").required(true))
                    .args(filter_args()),
            ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("dump")
                    .about("Restore from a JSON dump")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("backup")
                .about("Snapshot and restore the ledger")
                .subcommand(Command::new("create").about("Take a snapshot"))
                .subcommand(Command::new("list").about("List snapshots"))
                .subcommand(
                    Command::new("restore")
                        .about("Restore a snapshot")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(
                    Command::new("set-password")
                        .about("Set the deletion password")
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("show").about("Show settings")),
        )
        .subcommand(Command::new("doctor").about("Integrity checks"))
}
