// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: String, // raw label; normalized by frequency::monthly_amount
    pub is_active: bool,
}

/// A recurring expense. `person_id` is None for household-level expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub person_id: Option<i64>,
    pub name: String,
    pub amount: Decimal,
    pub frequency: String,
    pub category: String,
    pub is_active: bool,
}

/// A household budget line. Amounts are already monthly; only fixed lines
/// count toward monthly-expense totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetExpense {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub is_fixed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub original_amount: Decimal,
    pub current_balance: Decimal,
    pub interest_rate: Decimal, // percent, 0..=100
    pub monthly_payment: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub account_type: String,
    pub current_balance: Decimal,
    pub interest_rate: Option<Decimal>,
    pub monthly_deposit: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerAccount {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub current_value: Decimal,
}

/// `current_amount` is never stored; it is derived from linked savings
/// accounts (see goals::goal_progress).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub priority: i64,
    pub category: String,
    pub is_completed: bool,
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub note: Option<String>,
}
