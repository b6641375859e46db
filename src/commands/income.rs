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
pub struct IncomeRow {
    pub id: i64,
    pub person: String,
    pub name: String,
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
            let n = conn.execute("DELETE FROM income_sources WHERE id=?1", params![id])?;
            if n == 0 {
                println!("No income source with id {}", id);
            } else {
                println!("Removed income source {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let person = sub.get_one::<String>("person").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let frequency = parse_frequency(sub.get_one::<String>("frequency").unwrap())?;
    let inactive = sub.get_flag("inactive");
    let person_id = id_for_person(conn, &person)?;
    conn.execute(
        "INSERT INTO income_sources(person_id, name, amount, frequency, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![person_id, name, amount.to_string(), frequency, !inactive],
    )?;
    println!("Added income '{}' for {} ({} {})", name, person, amount, frequency);
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<IncomeRow>> {
    let mut sql = String::from(
        "SELECT i.id, p.name, i.name, i.amount, i.frequency, i.is_active
         FROM income_sources i JOIN persons p ON i.person_id=p.id",
    );
    let person = sub.get_one::<String>("person");
    let mut rows = Vec::new();
    let mut push = |r: &rusqlite::Row<'_>| -> Result<()> {
        let amount_s: String = r.get(3)?;
        let amount = crate::utils::parse_decimal(&amount_s)?;
        let frequency: String = r.get(4)?;
        rows.push(IncomeRow {
            id: r.get(0)?,
            person: r.get(1)?,
            name: r.get(2)?,
            amount,
            monthly: monthly_amount(amount, &frequency),
            frequency,
            is_active: r.get(5)?,
        });
        Ok(())
    };
    if let Some(person) = person {
        sql.push_str(" WHERE p.name=?1 ORDER BY i.id");
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query(params![person.trim()])?;
        while let Some(r) = cur.next()? {
            push(r)?;
        }
    } else {
        sql.push_str(" ORDER BY p.name, i.id");
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            push(r)?;
        }
    }
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.person.clone(),
                    r.name.clone(),
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
                &["Id", "Person", "Name", "Amount", "Frequency", "Monthly", "Active"],
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
        "UPDATE income_sources SET is_active=?1 WHERE id=?2",
        params![active, id],
    )?;
    if n == 0 {
        println!("No income source with id {}", id);
    } else {
        println!(
            "Income source {} is now {}",
            id,
            if active { "active" } else { "inactive" }
        );
    }
    Ok(())
}
