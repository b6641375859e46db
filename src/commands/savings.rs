// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_person, maybe_print_json, parse_amount, parse_rate, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub id: i64,
    pub person: String,
    pub name: String,
    pub kind: String,
    pub account_type: String,
    pub balance: rust_decimal::Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-balance", sub)) => set_balance(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let person = sub.get_one::<String>("person").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let balance = parse_amount(sub.get_one::<String>("balance").unwrap())?;
    let kind = sub.get_one::<String>("kind").unwrap();
    let person_id = id_for_person(conn, &person)?;
    if kind == "broker" {
        conn.execute(
            "INSERT INTO broker_accounts(person_id, name, current_value) VALUES (?1, ?2, ?3)",
            params![person_id, name, balance.to_string()],
        )?;
        println!("Added broker account '{}' for {} ({})", name, person, balance);
    } else {
        let account_type = sub
            .get_one::<String>("type")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "savings".to_string());
        let rate = sub
            .get_one::<String>("rate")
            .map(|s| parse_rate(s))
            .transpose()?;
        let deposit = sub
            .get_one::<String>("deposit")
            .map(|s| parse_amount(s))
            .transpose()?;
        conn.execute(
            "INSERT INTO savings_accounts(person_id, name, account_type, current_balance, interest_rate, monthly_deposit)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                person_id,
                name,
                account_type,
                balance.to_string(),
                rate.map(|d| d.to_string()),
                deposit.map(|d| d.to_string())
            ],
        )?;
        println!("Added savings account '{}' for {} ({})", name, person, balance);
    }
    Ok(())
}

pub fn query_rows(conn: &Connection) -> Result<Vec<AccountRow>> {
    let mut rows = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT s.id, p.name, s.name, s.account_type, s.current_balance
         FROM savings_accounts s JOIN persons p ON s.person_id=p.id ORDER BY s.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let balance: String = r.get(4)?;
        rows.push(AccountRow {
            id: r.get(0)?,
            person: r.get(1)?,
            name: r.get(2)?,
            kind: "savings".into(),
            account_type: r.get(3)?,
            balance: crate::utils::parse_decimal(&balance)?,
        });
    }
    let mut stmt = conn.prepare(
        "SELECT b.id, p.name, b.name, b.current_value
         FROM broker_accounts b JOIN persons p ON b.person_id=p.id ORDER BY b.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let value: String = r.get(3)?;
        rows.push(AccountRow {
            id: r.get(0)?,
            person: r.get(1)?,
            name: r.get(2)?,
            kind: "broker".into(),
            account_type: "broker".into(),
            balance: crate::utils::parse_decimal(&value)?,
        });
    }
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.person.clone(),
                    r.name.clone(),
                    r.kind.clone(),
                    r.account_type.clone(),
                    format!("{:.2}", r.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Person", "Name", "Kind", "Type", "Balance"], data)
        );
    }
    Ok(())
}

fn set_balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = sub.get_one::<String>("kind").unwrap();
    let n = if kind == "broker" {
        conn.execute(
            "UPDATE broker_accounts SET current_value=?1 WHERE name=?2",
            params![amount.to_string(), name],
        )?
    } else {
        conn.execute(
            "UPDATE savings_accounts SET current_balance=?1 WHERE name=?2",
            params![amount.to_string(), name],
        )?
    };
    if n == 0 {
        println!("No {} account named '{}'", kind, name);
    } else {
        println!("Balance for '{}' set to {}", name, amount);
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = sub.get_one::<String>("kind").unwrap();
    let n = if kind == "broker" {
        conn.execute("DELETE FROM broker_accounts WHERE name=?1", params![name])?
    } else {
        conn.execute("DELETE FROM savings_accounts WHERE name=?1", params![name])?
    };
    if n == 0 {
        println!("No {} account named '{}'", kind, name);
    } else {
        println!("Removed {} account '{}'", kind, name);
    }
    Ok(())
}
