// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::SavingsGoal;
use crate::utils::safe_div;

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress_percentage: Decimal,
    pub remaining_amount: Decimal,
    pub monthly_contribution: Decimal,
    pub estimated_months_to_goal: Option<u32>,
    pub estimated_completion_date: Option<NaiveDate>,
    pub is_completed: bool,
}

/// Percentage of target reached, clamped to [0, 100]. A zero target counts
/// as fully reached once anything is saved toward it.
pub fn progress_percentage(current: Decimal, target: Decimal) -> Decimal {
    if target.is_zero() {
        return if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    let pct = safe_div(current, target) * Decimal::ONE_HUNDRED;
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Months until the goal is reached at the given contribution rate.
/// None means "cannot estimate" (no positive contribution); a goal already
/// met is zero months.
pub fn months_to_goal(current: Decimal, target: Decimal, monthly: Decimal) -> Option<u32> {
    if current >= target {
        return Some(0);
    }
    if monthly <= Decimal::ZERO {
        return None;
    }
    let months = ((target - current) / monthly).ceil();
    months.to_u32()
}

/// Default contribution when a goal has no explicit figure: half the
/// household's monthly surplus, floored at zero.
pub fn default_contribution(monthly_surplus: Decimal) -> Decimal {
    (monthly_surplus / Decimal::from(2)).max(Decimal::ZERO)
}

/// Compute progress for one goal against its linked account balances.
pub fn goal_progress(
    goal: &SavingsGoal,
    linked_balances: &[Decimal],
    monthly_contribution: Decimal,
    today: NaiveDate,
) -> GoalProgress {
    let current: Decimal = linked_balances.iter().copied().sum();
    let remaining = (goal.target_amount - current).max(Decimal::ZERO);
    let months = months_to_goal(current, goal.target_amount, monthly_contribution);
    let completion = months.and_then(|m| today.checked_add_months(Months::new(m)));

    GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: current,
        progress_percentage: progress_percentage(current, goal.target_amount),
        remaining_amount: remaining,
        monthly_contribution,
        estimated_months_to_goal: months,
        estimated_completion_date: completion,
        is_completed: goal.is_completed,
    }
}

/// Presentation helper for the CLI table ("1 year 3 months").
pub fn fmt_months(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    match (years, rest) {
        (0, m) => format!("{} month{}", m, if m == 1 { "" } else { "s" }),
        (y, 0) => format!("{} year{}", y, if y == 1 { "" } else { "s" }),
        (y, m) => format!(
            "{} year{} {} month{}",
            y,
            if y == 1 { "" } else { "s" },
            m,
            if m == 1 { "" } else { "s" }
        ),
    }
}
