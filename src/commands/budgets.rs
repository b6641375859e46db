// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub amount: rust_decimal::Decimal,
    pub is_fixed: bool,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let fixed = !sub.get_flag("flexible");
    conn.execute(
        "INSERT INTO budget_expenses(category, amount, is_fixed) VALUES (?1,?2,?3)
         ON CONFLICT(category) DO UPDATE SET amount=excluded.amount, is_fixed=excluded.is_fixed",
        params![category, amount.to_string(), fixed],
    )?;
    println!(
        "Budget set for {} = {}/month ({})",
        category,
        amount,
        if fixed { "fixed" } else { "flexible" }
    );
    Ok(())
}

pub fn query_rows(conn: &Connection) -> Result<Vec<BudgetRow>> {
    let mut stmt =
        conn.prepare("SELECT category, amount, is_fixed FROM budget_expenses ORDER BY category")?;
    let mut cur = stmt.query([])?;
    let mut rows = Vec::new();
    while let Some(r) = cur.next()? {
        let amount_s: String = r.get(1)?;
        rows.push(BudgetRow {
            category: r.get(0)?,
            amount: crate::utils::parse_decimal(&amount_s)?,
            is_fixed: r.get(2)?,
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
                    r.category.clone(),
                    format!("{:.2}", r.amount),
                    if r.is_fixed { "fixed" } else { "flexible" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly", "Kind"], data));
    }
    Ok(())
}
