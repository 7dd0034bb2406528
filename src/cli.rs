// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kwacha")
        .version(crate_version!())
        .about("Personal finance ledger: income sources, spending categories and insights")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("warn")
                .help("Log verbosity (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Initialize the local store and print its path"))
        .subcommand(
            Command::new("profile")
                .about("Show or edit the profile name and salary")
                .subcommand(Command::new("show").about("Show name and salary"))
                .subcommand(
                    Command::new("set")
                        .about("Update name and salary; the balance moves by the salary change")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("salary")
                                .long("salary")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("income").about("Record income").subcommand(
                Command::new("add")
                    .about("Add income to a source (Business Income, Salary, Side Hustle)")
                    .arg(Arg::new("source").required(true))
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            ),
        )
        .subcommand(
            Command::new("expense").about("Record spending").subcommand(
                Command::new("add")
                    .about("Add an expense; 'Extras' is booked as Leisure")
                    .arg(Arg::new("category").required(true))
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List recent transactions, newest first")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("limit")
                                .help("Show every transaction"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Number of transactions to show (default 3)"),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction and reverse its effect")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand(json_flags(
                    Command::new("stats").about("Income, expenses and net flow"),
                ))
                .subcommand(json_flags(
                    Command::new("wallet").about("Total balance and income sources"),
                ))
                .subcommand(json_flags(
                    Command::new("income").about("Income by source"),
                ))
                .subcommand(json_flags(
                    Command::new("spending").about("Personal spending and category totals"),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("Exchange rates (USD based)")
                .subcommand(Command::new("fetch").about("Fetch and cache the latest rates"))
                .subcommand(Command::new("list").about("Show cached rates for supported currencies"))
                .subcommand(Command::new("clear").about("Drop the cached rates"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount using cached rates")
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("from").long("from").default_value("ZMW"))
                        .arg(Arg::new("to").long("to").default_value("USD")),
                ),
        )
        .subcommand(Command::new("insights").about("Ask the AI advisor for tips"))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the transaction log")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check cached totals against the transaction log"))
        .subcommand(
            Command::new("reset")
                .about("Replace the stored state with the default (or demo) data")
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Load sample data"),
                ),
        )
}
