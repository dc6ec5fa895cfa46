// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and browse expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an expense")
                .arg(Arg::new("description").short('d').long("description").required(true))
                .arg(Arg::new("amount").short('a').long("amount").required(true))
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Category id"),
                )
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("notes").short('n').long("notes")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of an expense")
                .arg(id_arg())
                .arg(Arg::new("description").short('d').long("description"))
                .arg(Arg::new("amount").short('a').long("amount"))
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("notes").short('n').long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg()))
        .subcommand(json_flags(
            Command::new("list")
                .about("List expenses with search, filter and sort")
                .arg(Arg::new("search").short('s').long("search"))
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("from").long("from").requires("to"))
                .arg(Arg::new("to").long("to").requires("from"))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("date")
                        .value_parser(["date", "amount", "description"]),
                )
                .arg(Arg::new("asc").long("asc").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("recent").about("Most recent expenses").arg(
                Arg::new("limit")
                    .long("limit")
                    .default_value("5")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(
            Command::new("range")
                .about("Expenses between two dates, inclusive")
                .arg(Arg::new("from").long("from").required(true))
                .arg(Arg::new("to").long("to").required(true)),
        ))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("icon").long("icon").default_value("dollar-sign"))
                .arg(Arg::new("color").long("color").default_value("blue")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a category")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category that no expense uses")
                .arg(id_arg()),
        )
        .subcommand(json_flags(
            Command::new("list").about("Categories with their spending"),
        ))
        .subcommand(json_flags(
            Command::new("show").about("Show one category").arg(id_arg()),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated spending")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary").about("Total and per-category spending"),
        ))
        .subcommand(json_flags(
            Command::new("dashboard").about("Total, category split and recent expenses"),
        ))
        .subcommand(json_flags(
            Command::new("month")
                .about("Monthly overview")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
        ))
}

pub fn build_cli() -> Command {
    Command::new("expensetrackr")
        .version(clap::crate_version!())
        .about("Track personal expenses by category")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Database file (overrides EXPENSETRACKR_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(expense_cmd())
        .subcommand(category_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export")
                .about("Write a backup of all data")
                .arg(Arg::new("out").short('o').long("out"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Replace data from an exported JSON file")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("reset").about("Delete all expenses and categories").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm the reset"),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change preferences")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .value_parser(["USD", "EUR", "GBP", "JPY"]),
                        )
                        .arg(
                            Arg::new("notifications")
                                .long("notifications")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity problems"))
}
