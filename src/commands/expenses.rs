// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::frequency::monthly_amount;
use crate::utils::{
    id_for_person, maybe_print_json, parse_amount, parse_frequency, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub person: Option<String>,
    pub name: String,
    pub category: String,
    pub amount: rust_decimal::Decimal,
    pub frequency: String,
    pub monthly: rust_decimal::Decimal,
    pub is_active: bool,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-active", sub)) => set_active(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
            if n == 0 {
                println!("No expense with id {}", id);
            } else {
                println!("Removed expense {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let frequency = parse_frequency(sub.get_one::<String>("frequency").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let inactive = sub.get_flag("inactive");
    let person_id = match sub.get_one::<String>("person") {
        Some(p) => Some(id_for_person(conn, p.trim())?),
        None => None,
    };
    conn.execute(
        "INSERT INTO expenses(person_id, name, amount, frequency, category, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![person_id, name, amount.to_string(), frequency, category, !inactive],
    )?;
    println!("Added expense '{}' ({} {}, {})", name, amount, frequency, category);
    Ok(())
}

pub fn query_rows(conn: &Connection) -> Result<Vec<ExpenseRow>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, p.name, e.name, e.category, e.amount, e.frequency, e.is_active
         FROM expenses e LEFT JOIN persons p ON e.person_id=p.id
         ORDER BY e.id",
    )?;
    let mut cur = stmt.query([])?;
    let mut rows = Vec::new();
    while let Some(r) = cur.next()? {
        let amount_s: String = r.get(4)?;
        let amount = crate::utils::parse_decimal(&amount_s)?;
        let frequency: String = r.get(5)?;
        rows.push(ExpenseRow {
            id: r.get(0)?,
            person: r.get(1)?,
            name: r.get(2)?,
            category: r.get(3)?,
            amount,
            monthly: monthly_amount(amount, &frequency),
            frequency,
            is_active: r.get(6)?,
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
                    r.id.to_string(),
                    r.person.clone().unwrap_or_else(|| "(household)".into()),
                    r.name.clone(),
                    r.category.clone(),
                    format!("{:.2}", r.amount),
                    r.frequency.clone(),
                    format!("{:.2}", r.monthly),
                    if r.is_active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Owner", "Name", "Category", "Amount", "Frequency", "Monthly", "Active"],
                data
            )
        );
    }
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let active = sub.get_one::<String>("active").unwrap() == "true";
    let n = conn.execute(
        "UPDATE expenses SET is_active=?1 WHERE id=?2",
        params![active, id],
    )?;
    if n == 0 {
        println!("No expense with id {}", id);
    } else {
        println!(
            "Expense {} is now {}",
            id,
            if active { "active" } else { "inactive" }
        );
    }
    Ok(())
}
