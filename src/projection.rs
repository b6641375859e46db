// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::Totals;

/// A typed scenario delta. Stored as tagged JSON in the
/// scenario_modifications table and validated on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modification {
    IncomeChange {
        monthly_delta: Decimal,
    },
    ExpenseChange {
        monthly_delta: Decimal,
    },
    LoanPayoff {
        amount: Decimal,
        #[serde(default)]
        monthly_payment_freed: Decimal,
    },
    NewInvestment {
        amount: Decimal,
        #[serde(default)]
        monthly_contribution: Decimal,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedModification {
    pub effective_date: NaiveDate,
    pub modification: Modification,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub net_worth: Decimal,
    pub total_debt: Decimal,
    pub total_savings: Decimal,
    pub total_investments: Decimal,
    pub monthly_cash_flow: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionDelta {
    pub date: NaiveDate,
    pub net_worth: Decimal,
    pub total_debt: Decimal,
    pub monthly_cash_flow: Decimal,
}

struct ProjectionState {
    totals: Totals,
    invest_contribution: Decimal,
}

impl ProjectionState {
    fn apply(&mut self, m: &Modification) {
        match m {
            Modification::IncomeChange { monthly_delta } => {
                self.totals.monthly_income += *monthly_delta;
            }
            Modification::ExpenseChange { monthly_delta } => {
                self.totals.monthly_expenses += *monthly_delta;
            }
            Modification::LoanPayoff {
                amount,
                monthly_payment_freed,
            } => {
                // Pay from savings, clamped to both the outstanding balance
                // and what the household actually has.
                let paid = (*amount)
                    .min(self.totals.total_debt)
                    .min(self.totals.total_savings.max(Decimal::ZERO))
                    .max(Decimal::ZERO);
                self.totals.total_debt -= paid;
                self.totals.total_savings -= paid;
                self.totals.monthly_debt_payments =
                    (self.totals.monthly_debt_payments - *monthly_payment_freed).max(Decimal::ZERO);
            }
            Modification::NewInvestment {
                amount,
                monthly_contribution,
            } => {
                let moved = (*amount)
                    .min(self.totals.total_savings.max(Decimal::ZERO))
                    .max(Decimal::ZERO);
                self.totals.total_savings -= moved;
                self.totals.total_investments += moved;
                self.invest_contribution += *monthly_contribution;
            }
        }
    }

    fn snapshot(&self, date: NaiveDate) -> ProjectionPoint {
        let t = &self.totals;
        ProjectionPoint {
            date,
            net_worth: t.total_savings + t.total_investments - t.total_debt,
            total_debt: t.total_debt,
            total_savings: t.total_savings,
            total_investments: t.total_investments,
            monthly_cash_flow: t.net_cash_flow(),
        }
    }
}

/// Project a household's baseline totals forward month by month.
///
/// Modifications are applied in effective-date order (insertion order for
/// ties), each once, at the first projection month on or after its date and
/// before that month's accrual. Each month the investments compound at
/// `annual_return_rate` (percent) / 12, investment contributions move out of
/// cash flow, and the remaining surplus (or deficit) accrues into savings.
pub fn project(
    baseline: &Totals,
    modifications: &[TimedModification],
    start: NaiveDate,
    months: u32,
    annual_return_rate: Decimal,
) -> Vec<ProjectionPoint> {
    let mut mods: Vec<&TimedModification> = modifications.iter().collect();
    mods.sort_by_key(|m| m.effective_date); // stable: ties keep insertion order

    let mut state = ProjectionState {
        totals: baseline.clone(),
        invest_contribution: Decimal::ZERO,
    };
    let monthly_rate = annual_return_rate / Decimal::ONE_HUNDRED / Decimal::from(12);

    let mut points = Vec::with_capacity(months as usize);
    let mut next = 0usize;
    for i in 1..=months {
        let Some(date) = start.checked_add_months(Months::new(i)) else {
            break;
        };
        while next < mods.len() && mods[next].effective_date <= date {
            state.apply(&mods[next].modification);
            next += 1;
        }

        state.totals.total_investments += state.totals.total_investments * monthly_rate;
        let cash = state.totals.net_cash_flow();
        let contrib = state.invest_contribution;
        state.totals.total_investments += contrib;
        state.totals.total_savings += cash - contrib;

        points.push(state.snapshot(date));
    }
    points
}

/// Diff two projection series point by point, up to the shorter one.
/// Deltas are `b - a`.
pub fn compare(a: &[ProjectionPoint], b: &[ProjectionPoint]) -> Vec<ProjectionDelta> {
    a.iter()
        .zip(b.iter())
        .map(|(pa, pb)| ProjectionDelta {
            date: pa.date,
            net_worth: pb.net_worth - pa.net_worth,
            total_debt: pb.total_debt - pa.total_debt,
            monthly_cash_flow: pb.monthly_cash_flow - pa.monthly_cash_flow,
        })
        .collect()
}
