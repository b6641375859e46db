// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kassabok::goals::{
    default_contribution, fmt_months, goal_progress, months_to_goal, progress_percentage,
};
use kassabok::models::SavingsGoal;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn goal(target: &str) -> SavingsGoal {
    SavingsGoal {
        id: 1,
        name: "vacation".to_string(),
        target_amount: dec(target),
        priority: 1,
        category: "travel".to_string(),
        is_completed: false,
        target_date: None,
    }
}

#[test]
fn months_to_goal_sentinels() {
    // No contribution: cannot estimate
    assert_eq!(months_to_goal(dec("400"), dec("1000"), Decimal::ZERO), None);
    // Already met: zero months
    assert_eq!(
        months_to_goal(dec("1000"), dec("1000"), dec("50")),
        Some(0)
    );
    // 600 remaining at 200/month
    assert_eq!(months_to_goal(dec("0"), dec("600"), dec("200")), Some(3));
}

#[test]
fn months_to_goal_rounds_up() {
    // 500 / 200 = 2.5 -> 3 months
    assert_eq!(months_to_goal(dec("100"), dec("600"), dec("200")), Some(3));
}

#[test]
fn negative_contribution_cannot_estimate() {
    assert_eq!(months_to_goal(dec("0"), dec("600"), dec("-50")), None);
}

#[test]
fn progress_clamped_to_hundred() {
    assert_eq!(progress_percentage(dec("1500"), dec("1000")), dec("100"));
}

#[test]
fn progress_zero_target() {
    assert_eq!(progress_percentage(dec("0"), dec("0")), Decimal::ZERO);
    assert_eq!(progress_percentage(dec("1"), dec("0")), dec("100"));
}

#[test]
fn progress_partial() {
    assert_eq!(progress_percentage(dec("400"), dec("1000")), dec("40"));
}

#[test]
fn goal_progress_sums_linked_accounts() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let p = goal_progress(
        &goal("1000"),
        &[dec("250"), dec("150")],
        dec("200"),
        today,
    );
    assert_eq!(p.current_amount, dec("400"));
    assert_eq!(p.remaining_amount, dec("600"));
    assert_eq!(p.progress_percentage, dec("40"));
    assert_eq!(p.estimated_months_to_goal, Some(3));
    assert_eq!(
        p.estimated_completion_date,
        NaiveDate::from_ymd_opt(2026, 4, 15)
    );
}

#[test]
fn goal_progress_without_contribution_has_no_eta() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let p = goal_progress(&goal("1000"), &[dec("400")], Decimal::ZERO, today);
    assert_eq!(p.estimated_months_to_goal, None);
    assert_eq!(p.estimated_completion_date, None);
}

#[test]
fn overfunded_goal_has_zero_remaining() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let p = goal_progress(&goal("1000"), &[dec("1500")], dec("100"), today);
    assert_eq!(p.remaining_amount, Decimal::ZERO);
    assert_eq!(p.estimated_months_to_goal, Some(0));
    assert_eq!(p.estimated_completion_date, Some(today));
}

#[test]
fn default_contribution_is_half_surplus_floored_at_zero() {
    assert_eq!(default_contribution(dec("1000")), dec("500"));
    assert_eq!(default_contribution(dec("-800")), Decimal::ZERO);
}

#[test]
fn duration_formatting() {
    assert_eq!(fmt_months(1), "1 month");
    assert_eq!(fmt_months(11), "11 months");
    assert_eq!(fmt_months(12), "1 year");
    assert_eq!(fmt_months(15), "1 year 3 months");
    assert_eq!(fmt_months(24), "2 years");
}
