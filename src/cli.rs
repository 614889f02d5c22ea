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
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn year_arg(required: bool) -> Arg {
    Arg::new("year")
        .long("year")
        .short('y')
        .required(required)
        .value_parser(value_parser!(i32))
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .required(required)
        .value_parser(value_parser!(u32).range(1..=12))
}

fn page_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("page")
            .long("page")
            .short('p')
            .value_parser(value_parser!(u64).range(1..))
            .default_value("1"),
    )
    .arg(
        Arg::new("per-page")
            .long("per-page")
            .value_parser(value_parser!(u64).range(1..))
            .help("Rows per page (10, 20, 50 or 100 in the dashboard)"),
    )
}

fn expense_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(year_arg(required))
        .arg(month_arg(required))
        .arg(
            Arg::new("day")
                .long("day")
                .short('d')
                .required(required)
                .value_parser(value_parser!(u32).range(1..=31)),
        )
        .arg(Arg::new("time").long("time").help("HH:MM"))
        .arg(Arg::new("description").long("description").alias("desc"))
        .arg(
            Arg::new("amount")
                .long("amount")
                .short('a')
                .required(required)
                .allow_hyphen_values(true)
                .help("Plain number or Rupiah, e.g. 25000 or Rp25.000"),
        )
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Monthly income and daily expense tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (TOML)"),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use the local SQLite database instead of the hosted backend"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Local database file (implies --local)"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("login")
                .about("Sign in to the hosted backend")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("DOMPET_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(json_flags(page_args(
            Command::new("dashboard")
                .about("Totals, expenses and monthly balances for a period")
                .arg(year_arg(false))
                .arg(month_arg(false)),
        )))
        .subcommand(json_flags(
            Command::new("years").about("Years with recorded months"),
        ))
        .subcommand(json_flags(
            Command::new("months")
                .about("Months recorded for a year")
                .arg(year_arg(true)),
        ))
        .subcommand(
            Command::new("income")
                .about("Monthly income")
                .subcommand(
                    Command::new("add")
                        .about("Record income for a month that has none yet")
                        .arg(year_arg(true))
                        .arg(month_arg(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("set")
                        .about("Overwrite a monthly balance")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx").about("Monthly balances").subcommand(json_flags(page_args(
                Command::new("list")
                    .arg(year_arg(false))
                    .arg(month_arg(false)),
            ))),
        )
        .subcommand(
            Command::new("expense")
                .about("Daily expenses")
                .subcommand(expense_fields(Command::new("add"), true))
                .subcommand(expense_fields(
                    Command::new("edit").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                    false,
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(page_args(
                    Command::new("list")
                        .arg(year_arg(true))
                        .arg(month_arg(true)),
                ))),
        )
        .subcommand(
            Command::new("asset")
                .about("Net worth reference rows")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("total")),
        )
        .subcommand(
            Command::new("export")
                .about("Write a year's monthly balances to a file")
                .arg(year_arg(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(json_flags(
            Command::new("restore")
                .about("Upsert monthly balances from an export file")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .help("Defaults to the file extension"),
                ),
        ))
        .subcommand(
            Command::new("theme")
                .about("Light/dark table theme")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("toggle"))
                .subcommand(
                    Command::new("set").arg(
                        Arg::new("theme")
                            .required(true)
                            .value_parser(["light", "dark"]),
                    ),
                ),
        )
}
