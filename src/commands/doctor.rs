// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::frequency::Frequency;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Data-quality checks. The calculators silently skip bad rows (unknown
/// frequencies contribute zero); this is where those rows get surfaced.
pub fn handle(conn: &Connection) -> Result<()> {
    let rows = collect_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn collect_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Unrecognized frequency labels: excluded from all monthly totals.
    for table in ["income_sources", "expenses"] {
        let mut stmt =
            conn.prepare(&format!("SELECT id, name, frequency FROM {} ORDER BY id", table))?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let name: String = r.get(1)?;
            let freq: String = r.get(2)?;
            if Frequency::parse(&freq).is_none() {
                rows.push(vec![
                    "unknown_frequency".into(),
                    format!("{} {} '{}' ({})", table, id, name, freq),
                ]);
            }
        }
    }

    // 2) Loans with negative balances or out-of-range rates.
    let mut stmt =
        conn.prepare("SELECT id, name, current_balance, interest_rate FROM loans ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let balance_s: String = r.get(2)?;
        let rate_s: String = r.get(3)?;
        match balance_s.parse::<Decimal>() {
            Ok(b) if b < Decimal::ZERO => {
                rows.push(vec![
                    "negative_loan_balance".into(),
                    format!("loan {} '{}' ({})", id, name, b),
                ]);
            }
            Ok(_) => {}
            Err(_) => rows.push(vec![
                "invalid_decimal".into(),
                format!("loan {} '{}' balance '{}'", id, name, balance_s),
            ]),
        }
        match rate_s.parse::<Decimal>() {
            Ok(rt) if rt < Decimal::ZERO || rt > Decimal::from(100) => {
                rows.push(vec![
                    "rate_out_of_range".into(),
                    format!("loan {} '{}' ({}%)", id, name, rt),
                ]);
            }
            Ok(_) => {}
            Err(_) => rows.push(vec![
                "invalid_decimal".into(),
                format!("loan {} '{}' rate '{}'", id, name, rate_s),
            ]),
        }
    }

    // 3) Goal links pointing at accounts that no longer exist.
    let mut stmt = conn.prepare(
        "SELECT g.goal_id, g.account_id FROM goal_accounts g
         LEFT JOIN savings_accounts s ON g.account_id=s.id
         WHERE s.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let goal_id: i64 = r.get(0)?;
        let account_id: i64 = r.get(1)?;
        rows.push(vec![
            "dangling_goal_link".into(),
            format!("goal {} -> account {}", goal_id, account_id),
        ]);
    }

    // 4) Completed goals whose linked balances no longer cover the target.
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount FROM savings_goals WHERE is_completed=1 ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let target_s: String = r.get(2)?;
        let target = match target_s.parse::<Decimal>() {
            Ok(t) => t,
            Err(_) => continue,
        };
        let mut st = conn.prepare(
            "SELECT s.current_balance FROM goal_accounts g
             JOIN savings_accounts s ON g.account_id=s.id WHERE g.goal_id=?1",
        )?;
        let mut bc = st.query(rusqlite::params![id])?;
        let mut current = Decimal::ZERO;
        while let Some(b) = bc.next()? {
            let s: String = b.get(0)?;
            if let Ok(v) = s.parse::<Decimal>() {
                current += v;
            }
        }
        if current < target {
            rows.push(vec![
                "completed_goal_underfunded".into(),
                format!("goal {} '{}' ({} < {})", id, name, current, target),
            ]);
        }
    }

    Ok(rows)
}
