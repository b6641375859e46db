// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::frequency::monthly_amount;
use crate::models::{
    BrokerAccount, BudgetExpense, Expense, IncomeSource, Loan, Person, SavingsAccount,
};

/// In-memory snapshot of a household's records, loaded once per command by
/// db::load_records. The aggregation below is pure over this snapshot.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub persons: Vec<Person>,
    pub income_sources: Vec<IncomeSource>,
    pub expenses: Vec<Expense>,
    pub budget_expenses: Vec<BudgetExpense>,
    pub loans: Vec<Loan>,
    pub savings_accounts: Vec<SavingsAccount>,
    pub broker_accounts: Vec<BrokerAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_debt_payments: Decimal,
    pub total_debt: Decimal,
    pub total_savings: Decimal,
    pub total_investments: Decimal,
}

impl Totals {
    pub fn add(&mut self, other: &Totals) {
        self.monthly_income += other.monthly_income;
        self.monthly_expenses += other.monthly_expenses;
        self.monthly_debt_payments += other.monthly_debt_payments;
        self.total_debt += other.total_debt;
        self.total_savings += other.total_savings;
        self.total_investments += other.total_investments;
    }

    /// Monthly surplus: income less expenses less debt service.
    pub fn net_cash_flow(&self) -> Decimal {
        self.monthly_income - self.monthly_expenses - self.monthly_debt_payments
    }

    pub fn is_empty(&self) -> bool {
        *self == Totals::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonTotals {
    pub person_id: i64,
    pub name: String,
    pub totals: Totals,
}

#[derive(Debug, Clone, Serialize)]
pub struct HouseholdTotals {
    pub combined: Totals,
    pub per_person: Vec<PersonTotals>,
    /// Household-level monthly expenses (unowned expenses plus fixed budget
    /// lines), already counted in `combined.monthly_expenses`.
    pub household_monthly_expenses: Decimal,
}

/// Totals over a single person's records. Inactive income and expense rows
/// are retained in the snapshot but contribute nothing here.
pub fn person_totals(person_id: i64, records: &Records) -> Totals {
    let mut t = Totals::default();
    for inc in records.income_sources.iter().filter(|i| i.person_id == person_id) {
        if inc.is_active {
            t.monthly_income += monthly_amount(inc.amount, &inc.frequency);
        }
    }
    for exp in records.expenses.iter().filter(|e| e.person_id == Some(person_id)) {
        if exp.is_active {
            t.monthly_expenses += monthly_amount(exp.amount, &exp.frequency);
        }
    }
    for loan in records.loans.iter().filter(|l| l.person_id == person_id) {
        t.total_debt += loan.current_balance;
        t.monthly_debt_payments += loan.monthly_payment;
    }
    for acc in records.savings_accounts.iter().filter(|a| a.person_id == person_id) {
        t.total_savings += acc.current_balance;
    }
    for acc in records.broker_accounts.iter().filter(|a| a.person_id == person_id) {
        t.total_investments += acc.current_value;
    }
    t
}

/// Household totals: sum of per-person totals plus household-level expenses.
/// Every record is owned by exactly one person or by the household, so the
/// combined figures are the per-person sum with no double counting.
pub fn household_totals(records: &Records) -> HouseholdTotals {
    let mut combined = Totals::default();
    let mut per_person = Vec::with_capacity(records.persons.len());
    for p in &records.persons {
        let t = person_totals(p.id, records);
        combined.add(&t);
        per_person.push(PersonTotals {
            person_id: p.id,
            name: p.name.clone(),
            totals: t,
        });
    }

    let mut household_monthly_expenses = Decimal::ZERO;
    for exp in records.expenses.iter().filter(|e| e.person_id.is_none()) {
        if exp.is_active {
            household_monthly_expenses += monthly_amount(exp.amount, &exp.frequency);
        }
    }
    // Fixed budget lines are already monthly; flexible lines are planning
    // figures only.
    for b in records.budget_expenses.iter().filter(|b| b.is_fixed) {
        household_monthly_expenses += b.amount;
    }
    combined.monthly_expenses += household_monthly_expenses;

    HouseholdTotals {
        combined,
        per_person,
        household_monthly_expenses,
    }
}
