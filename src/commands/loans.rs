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
pub struct LoanRow {
    pub id: i64,
    pub person: String,
    pub name: String,
    pub original_amount: rust_decimal::Decimal,
    pub current_balance: rust_decimal::Decimal,
    pub interest_rate: rust_decimal::Decimal,
    pub monthly_payment: rust_decimal::Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM loans WHERE id=?1", params![id])?;
            if n == 0 {
                println!("No loan with id {}", id);
            } else {
                println!("Removed loan {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let person = sub.get_one::<String>("person").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let original = parse_amount(sub.get_one::<String>("original").unwrap())?;
    let balance = parse_amount(sub.get_one::<String>("balance").unwrap())?;
    let rate = parse_rate(sub.get_one::<String>("rate").unwrap())?;
    let payment = parse_amount(sub.get_one::<String>("payment").unwrap())?;
    let person_id = id_for_person(conn, &person)?;
    conn.execute(
        "INSERT INTO loans(person_id, name, original_amount, current_balance, interest_rate, monthly_payment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            person_id,
            name,
            original.to_string(),
            balance.to_string(),
            rate.to_string(),
            payment.to_string()
        ],
    )?;
    println!("Added loan '{}' for {} (balance {})", name, person, balance);
    Ok(())
}

pub fn query_rows(conn: &Connection) -> Result<Vec<LoanRow>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, p.name, l.name, l.original_amount, l.current_balance, l.interest_rate, l.monthly_payment
         FROM loans l JOIN persons p ON l.person_id=p.id ORDER BY l.id",
    )?;
    let mut cur = stmt.query([])?;
    let mut rows = Vec::new();
    while let Some(r) = cur.next()? {
        let original: String = r.get(3)?;
        let balance: String = r.get(4)?;
        let rate: String = r.get(5)?;
        let payment: String = r.get(6)?;
        rows.push(LoanRow {
            id: r.get(0)?,
            person: r.get(1)?,
            name: r.get(2)?,
            original_amount: crate::utils::parse_decimal(&original)?,
            current_balance: crate::utils::parse_decimal(&balance)?,
            interest_rate: crate::utils::parse_decimal(&rate)?,
            monthly_payment: crate::utils::parse_decimal(&payment)?,
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
                    r.person.clone(),
                    r.name.clone(),
                    format!("{:.2}", r.original_amount),
                    format!("{:.2}", r.current_balance),
                    format!("{:.2}%", r.interest_rate),
                    format!("{:.2}", r.monthly_payment),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Person", "Name", "Original", "Balance", "Rate", "Payment"],
                data
            )
        );
    }
    Ok(())
}
