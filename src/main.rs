// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use kassabok::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("person", sub)) => commands::persons::handle(&conn, sub)?,
        Some(("income", sub)) => commands::income::handle(&conn, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&conn, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("health", sub)) => commands::health::handle(&conn, sub)?,
        Some(("scenario", sub)) => commands::scenarios::handle(&conn, sub)?,
        Some(("prefs", sub)) => commands::prefs::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
