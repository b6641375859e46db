// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{household_totals, HouseholdTotals};
use crate::health::{analyze, HealthReport};
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthOutput {
    pub totals: HouseholdTotals,
    pub report: HealthReport,
}

/// Load the snapshot, aggregate, analyze. The report side is pure; this is
/// the single I/O seam.
pub fn report_for(conn: &Connection, target_months: u32) -> Result<HealthOutput> {
    let records = crate::db::load_records(conn)?;
    let totals = household_totals(&records);
    let report = analyze(&totals.combined, target_months);
    Ok(HealthOutput { totals, report })
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let target_months = *sub.get_one::<u32>("target-months").unwrap();

    let out = report_for(conn, target_months)?;
    if maybe_print_json(json_flag, jsonl_flag, &out)? {
        return Ok(());
    }

    let ccy = get_currency(conn)?;
    let r = &out.report;
    let mut data = vec![
        vec![
            "Net worth".to_string(),
            fmt_money(&r.net_worth.total, &ccy),
            r.net_worth.status.label().to_string(),
        ],
        vec![
            "Monthly cash flow".to_string(),
            fmt_money(&r.cash_flow.monthly.net_cash_flow, &ccy),
            String::new(),
        ],
        vec![
            "Savings rate".to_string(),
            format!("{:.1}%", r.savings_rate.ratio * rust_decimal::Decimal::ONE_HUNDRED),
            r.savings_rate.status.label().to_string(),
        ],
        vec![
            "Debt-to-income".to_string(),
            format!("{:.1}%", r.debt_to_income.ratio * rust_decimal::Decimal::ONE_HUNDRED),
            r.debt_to_income.status.label().to_string(),
        ],
        vec![
            "Emergency fund".to_string(),
            format!(
                "{:.1} months (target {})",
                r.emergency_fund.months_of_expenses, r.emergency_fund.target_months
            ),
            r.emergency_fund.status.label().to_string(),
        ],
    ];
    data.push(vec![
        "Overall".to_string(),
        String::new(),
        r.summary
            .overall_health
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "no data".to_string()),
    ]);
    println!("{}", pretty_table(&["Metric", "Value", "Status"], data));

    let per_person = out
        .totals
        .per_person
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                format!("{:.2}", p.totals.monthly_income),
                format!("{:.2}", p.totals.monthly_expenses),
                format!("{:.2}", p.totals.total_debt),
                format!("{:.2}", p.totals.total_savings + p.totals.total_investments),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Person", "Income/mo", "Expenses/mo", "Debt", "Assets"],
            per_person
        )
    );
    Ok(())
}
