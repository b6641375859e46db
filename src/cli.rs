// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

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
            .help("Print as JSON lines"),
    )
}

fn req(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

pub fn build_cli() -> Command {
    Command::new("kassabok")
        .about("Household budgeting, financial health, and savings-goal projection")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the household database"))
        .subcommand(
            Command::new("person")
                .about("Manage household members")
                .subcommand(
                    Command::new("add")
                        .arg(req("name"))
                        .arg(opt("age").value_parser(value_parser!(u32))),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(req("name"))),
        )
        .subcommand(
            Command::new("income")
                .about("Manage income sources")
                .subcommand(
                    Command::new("add")
                        .arg(req("person"))
                        .arg(req("name"))
                        .arg(req("amount"))
                        .arg(req("frequency").help("monthly|yearly|weekly|bi-weekly|daily"))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list").arg(opt("person"))))
                .subcommand(
                    Command::new("set-active")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(req("active").value_parser(["true", "false"])),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64)))),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage recurring expenses")
                .subcommand(
                    Command::new("add")
                        .arg(req("name"))
                        .arg(req("amount"))
                        .arg(req("frequency").help("monthly|yearly|weekly|bi-weekly|daily"))
                        .arg(req("category"))
                        .arg(opt("person").help("Owner; omit for a household-level expense"))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-active")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(req("active").value_parser(["true", "false"])),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64)))),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly budget lines")
                .subcommand(
                    Command::new("set").arg(req("category")).arg(req("amount")).arg(
                        Arg::new("flexible")
                            .long("flexible")
                            .action(ArgAction::SetTrue)
                            .help("Planning figure only; excluded from monthly totals"),
                    ),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("loan")
                .about("Manage loans")
                .subcommand(
                    Command::new("add")
                        .arg(req("person"))
                        .arg(req("name"))
                        .arg(req("original"))
                        .arg(req("balance"))
                        .arg(req("rate").help("Annual interest percent, 0..=100"))
                        .arg(req("payment").help("Monthly payment")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64)))),
        )
        .subcommand(
            Command::new("savings")
                .about("Manage savings and broker accounts")
                .subcommand(
                    Command::new("add")
                        .arg(req("person"))
                        .arg(req("name"))
                        .arg(req("balance"))
                        .arg(
                            opt("kind")
                                .value_parser(["savings", "broker"])
                                .default_value("savings"),
                        )
                        .arg(opt("type").help("Account type label, e.g. buffer, pension"))
                        .arg(opt("rate").help("Annual interest percent"))
                        .arg(opt("deposit").help("Planned monthly deposit")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-balance")
                        .arg(req("name"))
                        .arg(req("amount"))
                        .arg(
                            opt("kind")
                                .value_parser(["savings", "broker"])
                                .default_value("savings"),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(req("name")).arg(
                        opt("kind")
                            .value_parser(["savings", "broker"])
                            .default_value("savings"),
                    ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(req("name"))
                        .arg(req("target"))
                        .arg(
                            opt("priority")
                                .value_parser(value_parser!(i64))
                                .default_value("1"),
                        )
                        .arg(opt("category").default_value("general"))
                        .arg(opt("target-date").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("link").arg(req("goal")).arg(req("account")))
                .subcommand(Command::new("unlink").arg(req("goal")).arg(req("account")))
                .subcommand(json_flags(
                    Command::new("progress")
                        .arg(opt("monthly").help("Override monthly contribution")),
                ))
                .subcommand(Command::new("complete").arg(req("name")))
                .subcommand(Command::new("rm").arg(req("name"))),
        )
        .subcommand(json_flags(
            Command::new("health")
                .about("Household financial health report")
                .arg(
                    Arg::new("target-months")
                        .long("target-months")
                        .value_parser(value_parser!(u32))
                        .default_value("3")
                        .help("Emergency-fund target in months of expenses"),
                ),
        ))
        .subcommand(
            Command::new("scenario")
                .about("What-if scenarios and projections")
                .subcommand(Command::new("add").arg(req("name")).arg(opt("note")))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(req("name")))
                .subcommand(
                    Command::new("modify")
                        .arg(req("scenario"))
                        .arg(req("date").help("Effective date, YYYY-MM-DD"))
                        .arg(req("payload").help(
                            r#"Tagged JSON, e.g. {"kind":"income_change","monthly_delta":"500"}"#,
                        )),
                )
                .subcommand(json_flags(
                    Command::new("project")
                        .arg(req("scenario"))
                        .arg(
                            req("months").value_parser(value_parser!(u32)),
                        )
                        .arg(opt("return-rate").help("Annual investment return percent")),
                ))
                .subcommand(json_flags(
                    Command::new("compare")
                        .arg(req("a"))
                        .arg(req("b"))
                        .arg(req("months").value_parser(value_parser!(u32)))
                        .arg(opt("return-rate").help("Annual investment return percent")),
                )),
        )
        .subcommand(
            Command::new("prefs")
                .about("Locale and currency preferences")
                .subcommand(
                    Command::new("set")
                        .arg(opt("locale").value_parser(["en", "sv"]))
                        .arg(opt("currency")),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(Command::new("doctor").about("Check the database for data-quality issues"))
}
