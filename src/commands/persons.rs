// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let age = sub.get_one::<u32>("age");
            conn.execute(
                "INSERT INTO persons(name, age) VALUES (?1, ?2)",
                params![name, age],
            )?;
            println!("Added person '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt =
                conn.prepare("SELECT name, age, created_at FROM persons ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, Option<u32>>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, a, cr) = row?;
                data.push(vec![
                    n,
                    a.map(|v| v.to_string()).unwrap_or_default(),
                    cr,
                ]);
            }
            println!("{}", pretty_table(&["Name", "Age", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            // FK cascade removes the person's income, expenses, loans and
            // accounts in the same statement.
            let n = conn.execute("DELETE FROM persons WHERE name=?1", params![name])?;
            if n == 0 {
                println!("No person named '{}'", name);
            } else {
                println!("Removed person '{}' and their records", name);
            }
        }
        _ => {}
    }
    Ok(())
}
