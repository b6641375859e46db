// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::household_totals;
use crate::goals::{default_contribution, fmt_months, goal_progress, GoalProgress};
use crate::models::SavingsGoal;
use crate::utils::{
    id_for_goal, id_for_savings_account, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("link", sub)) => link(conn, sub)?,
        Some(("unlink", sub)) => unlink(conn, sub)?,
        Some(("progress", sub)) => progress(conn, sub)?,
        Some(("complete", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let goal_id = id_for_goal(conn, name)?;
            conn.execute(
                "UPDATE savings_goals SET is_completed=1 WHERE id=?1",
                params![goal_id],
            )?;
            println!("Marked goal '{}' as completed", name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM savings_goals WHERE name=?1", params![name])?;
            if n == 0 {
                println!("No goal named '{}'", name);
            } else {
                println!("Removed goal '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let priority = *sub.get_one::<i64>("priority").unwrap();
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let target_date = sub
        .get_one::<String>("target-date")
        .map(|s| parse_date(s))
        .transpose()?;
    conn.execute(
        "INSERT INTO savings_goals(name, target_amount, priority, category, target_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            target.to_string(),
            priority,
            category,
            target_date.map(|d| d.to_string())
        ],
    )?;
    println!("Added goal '{}' (target {})", name, target);
    Ok(())
}

fn link(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goal = sub.get_one::<String>("goal").unwrap();
    let account = sub.get_one::<String>("account").unwrap();
    let goal_id = id_for_goal(conn, goal)?;
    let account_id = id_for_savings_account(conn, account)?;
    conn.execute(
        "INSERT OR IGNORE INTO goal_accounts(goal_id, account_id) VALUES (?1, ?2)",
        params![goal_id, account_id],
    )?;
    println!("Linked '{}' to goal '{}'", account, goal);
    Ok(())
}

fn unlink(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goal = sub.get_one::<String>("goal").unwrap();
    let account = sub.get_one::<String>("account").unwrap();
    let goal_id = id_for_goal(conn, goal)?;
    let account_id = id_for_savings_account(conn, account)?;
    conn.execute(
        "DELETE FROM goal_accounts WHERE goal_id=?1 AND account_id=?2",
        params![goal_id, account_id],
    )?;
    println!("Unlinked '{}' from goal '{}'", account, goal);
    Ok(())
}

fn load_goals(conn: &Connection) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, priority, category, is_completed, target_date
         FROM savings_goals ORDER BY priority, id",
    )?;
    let mut cur = stmt.query([])?;
    let mut goals = Vec::new();
    while let Some(r) = cur.next()? {
        let target_s: String = r.get(2)?;
        let date_s: Option<String> = r.get(6)?;
        goals.push(SavingsGoal {
            id: r.get(0)?,
            name: r.get(1)?,
            target_amount: crate::utils::parse_decimal(&target_s)?,
            priority: r.get(3)?,
            category: r.get(4)?,
            is_completed: r.get(5)?,
            target_date: date_s.map(|s| parse_date(&s)).transpose()?,
        });
    }
    Ok(goals)
}

fn linked_balances(conn: &Connection, goal_id: i64) -> Result<Vec<Decimal>> {
    let mut stmt = conn.prepare(
        "SELECT s.current_balance FROM goal_accounts g
         JOIN savings_accounts s ON g.account_id=s.id
         WHERE g.goal_id=?1",
    )?;
    let mut cur = stmt.query(params![goal_id])?;
    let mut balances = Vec::new();
    while let Some(r) = cur.next()? {
        let s: String = r.get(0)?;
        balances.push(crate::utils::parse_decimal(&s)?);
    }
    Ok(balances)
}

/// Progress for every goal. The contribution is the explicit override when
/// given, otherwise half the household's monthly surplus.
pub fn progress_rows(
    conn: &Connection,
    monthly_override: Option<Decimal>,
    today: NaiveDate,
) -> Result<Vec<GoalProgress>> {
    let monthly = match monthly_override {
        Some(m) => m,
        None => {
            let records = crate::db::load_records(conn)?;
            default_contribution(household_totals(&records).combined.net_cash_flow())
        }
    };
    let mut rows = Vec::new();
    for goal in load_goals(conn)? {
        let balances = linked_balances(conn, goal.id)?;
        rows.push(goal_progress(&goal, &balances, monthly, today));
    }
    Ok(rows)
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let monthly = sub
        .get_one::<String>("monthly")
        .map(|s| parse_amount(s))
        .transpose()?;
    let today = chrono::Utc::now().date_naive();
    let rows = progress_rows(conn, monthly, today)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    format!("{:.2}", r.current_amount),
                    format!("{:.2}", r.target_amount),
                    format!("{:.1}%", r.progress_percentage),
                    format!("{:.2}", r.remaining_amount),
                    match r.estimated_months_to_goal {
                        Some(0) => "reached".to_string(),
                        Some(m) => fmt_months(m),
                        None => "cannot estimate".to_string(),
                    },
                    r.estimated_completion_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Current", "Target", "Progress", "Remaining", "ETA", "Date"],
                data
            )
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = load_goals(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
        let data = goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    format!("{:.2}", g.target_amount),
                    g.priority.to_string(),
                    g.category.clone(),
                    if g.is_completed { "yes" } else { "no" }.to_string(),
                    g.target_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Target", "Priority", "Category", "Completed", "Target date"],
                data
            )
        );
    }
    Ok(())
}
