// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, get_locale, pretty_table, set_currency, set_locale};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            if let Some(locale) = sub.get_one::<String>("locale") {
                set_locale(conn, locale)?;
                println!("Locale set to {}", locale);
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                set_currency(conn, ccy)?;
                println!("Currency set to {}", ccy.to_uppercase());
            }
        }
        Some(("show", _)) => {
            let data = vec![
                vec!["locale".to_string(), get_locale(conn)?],
                vec!["currency".to_string(), get_currency(conn)?],
            ];
            println!("{}", pretty_table(&["Preference", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}
