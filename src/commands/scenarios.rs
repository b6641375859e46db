// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::household_totals;
use crate::projection::{compare, project, Modification, ProjectionPoint, TimedModification};
use crate::utils::{
    id_for_scenario, maybe_print_json, parse_date, parse_rate, pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let note = sub.get_one::<String>("note");
            conn.execute(
                "INSERT INTO scenarios(name, note) VALUES (?1, ?2)",
                params![name, note],
            )?;
            println!("Added scenario '{}'", name);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM scenarios WHERE name=?1", params![name])?;
            if n == 0 {
                println!("No scenario named '{}'", name);
            } else {
                println!("Removed scenario '{}'", name);
            }
        }
        Some(("modify", sub)) => modify(conn, sub)?,
        Some(("project", sub)) => run_project(conn, sub)?,
        Some(("compare", sub)) => run_compare(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT s.name, s.note, s.created_at, COUNT(m.id)
         FROM scenarios s LEFT JOIN scenario_modifications m ON m.scenario_id=s.id
         GROUP BY s.id ORDER BY s.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, i64>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, note, created, mods) = row?;
        data.push(vec![name, note.unwrap_or_default(), created, mods.to_string()]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Name", "Note", "Created", "Modifications"], data)
        );
    }
    Ok(())
}

fn modify(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let scenario = sub.get_one::<String>("scenario").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let payload = sub.get_one::<String>("payload").unwrap();
    // Round-trip through the typed enum so bad payloads are rejected here,
    // not at projection time.
    let modification: Modification = serde_json::from_str(payload)
        .with_context(|| format!("Invalid modification payload '{}'", payload))?;
    let scenario_id = id_for_scenario(conn, scenario)?;
    conn.execute(
        "INSERT INTO scenario_modifications(scenario_id, effective_date, payload)
         VALUES (?1, ?2, ?3)",
        params![scenario_id, date.to_string(), serde_json::to_string(&modification)?],
    )?;
    println!("Recorded modification for '{}' effective {}", scenario, date);
    Ok(())
}

pub fn load_modifications(conn: &Connection, scenario_id: i64) -> Result<Vec<TimedModification>> {
    let mut stmt = conn.prepare(
        "SELECT effective_date, payload FROM scenario_modifications
         WHERE scenario_id=?1 ORDER BY effective_date, id",
    )?;
    let mut cur = stmt.query(params![scenario_id])?;
    let mut mods = Vec::new();
    while let Some(r) = cur.next()? {
        let date_s: String = r.get(0)?;
        let payload: String = r.get(1)?;
        mods.push(TimedModification {
            effective_date: parse_date(&date_s)?,
            modification: serde_json::from_str(&payload)
                .with_context(|| format!("Invalid stored payload '{}'", payload))?,
        });
    }
    Ok(mods)
}

pub fn project_scenario(
    conn: &Connection,
    scenario: &str,
    months: u32,
    return_rate: Decimal,
) -> Result<Vec<ProjectionPoint>> {
    let scenario_id = id_for_scenario(conn, scenario)?;
    let mods = load_modifications(conn, scenario_id)?;
    let records = crate::db::load_records(conn)?;
    let baseline = household_totals(&records).combined;
    let start = chrono::Utc::now().date_naive();
    Ok(project(&baseline, &mods, start, months, return_rate))
}

fn return_rate_arg(sub: &clap::ArgMatches) -> Result<Decimal> {
    match sub.get_one::<String>("return-rate") {
        Some(s) => parse_rate(s),
        None => Ok(Decimal::ZERO),
    }
}

fn run_project(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let scenario = sub.get_one::<String>("scenario").unwrap();
    let months = *sub.get_one::<u32>("months").unwrap();
    let rate = return_rate_arg(sub)?;

    let points = project_scenario(conn, scenario, months, rate)?;
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let data = points
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    format!("{:.2}", p.net_worth),
                    format!("{:.2}", p.total_savings),
                    format!("{:.2}", p.total_investments),
                    format!("{:.2}", p.total_debt),
                    format!("{:.2}", p.monthly_cash_flow),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Net worth", "Savings", "Investments", "Debt", "Cash flow/mo"],
                data
            )
        );
    }
    Ok(())
}

fn run_compare(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = sub.get_one::<String>("a").unwrap();
    let b = sub.get_one::<String>("b").unwrap();
    let months = *sub.get_one::<u32>("months").unwrap();
    let rate = return_rate_arg(sub)?;

    let series_a = project_scenario(conn, a, months, rate)?;
    let series_b = project_scenario(conn, b, months, rate)?;
    let deltas = compare(&series_a, &series_b);
    if !maybe_print_json(json_flag, jsonl_flag, &deltas)? {
        let data = deltas
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    format!("{:.2}", d.net_worth),
                    format!("{:.2}", d.total_debt),
                    format!("{:.2}", d.monthly_cash_flow),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Date",
                    &format!("Net worth ({} - {})", b, a),
                    "Debt delta",
                    "Cash flow delta"
                ],
                data
            )
        );
    }
    Ok(())
}
