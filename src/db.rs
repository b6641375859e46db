// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::aggregate::Records;
use crate::models::{
    BrokerAccount, BudgetExpense, Expense, IncomeSource, Loan, Person, SavingsAccount,
};
use crate::utils::parse_decimal;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Kassabok", "kassabok"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("kassabok.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS persons(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        age INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Deleting a person cascades to everything they own.
    CREATE TABLE IF NOT EXISTS income_sources(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        person_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY(person_id) REFERENCES persons(id) ON DELETE CASCADE
    );

    -- person_id NULL means a household-level expense.
    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        person_id INTEGER,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL,
        category TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY(person_id) REFERENCES persons(id) ON DELETE CASCADE
    );

    -- Budget lines are already monthly amounts.
    CREATE TABLE IF NOT EXISTS budget_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL UNIQUE,
        amount TEXT NOT NULL,
        is_fixed INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        person_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        original_amount TEXT NOT NULL,
        current_balance TEXT NOT NULL,
        interest_rate TEXT NOT NULL,
        monthly_payment TEXT NOT NULL,
        FOREIGN KEY(person_id) REFERENCES persons(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS savings_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        person_id INTEGER NOT NULL,
        name TEXT NOT NULL UNIQUE,
        account_type TEXT NOT NULL DEFAULT 'savings',
        current_balance TEXT NOT NULL,
        interest_rate TEXT,
        monthly_deposit TEXT,
        FOREIGN KEY(person_id) REFERENCES persons(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS broker_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        person_id INTEGER NOT NULL,
        name TEXT NOT NULL UNIQUE,
        current_value TEXT NOT NULL,
        FOREIGN KEY(person_id) REFERENCES persons(id) ON DELETE CASCADE
    );

    -- current_amount is derived from linked accounts, never stored.
    CREATE TABLE IF NOT EXISTS savings_goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        target_amount TEXT NOT NULL,
        priority INTEGER NOT NULL DEFAULT 1,
        category TEXT NOT NULL DEFAULT 'general',
        is_completed INTEGER NOT NULL DEFAULT 0,
        target_date TEXT
    );

    CREATE TABLE IF NOT EXISTS goal_accounts(
        goal_id INTEGER NOT NULL,
        account_id INTEGER NOT NULL,
        UNIQUE(goal_id, account_id),
        FOREIGN KEY(goal_id) REFERENCES savings_goals(id) ON DELETE CASCADE,
        FOREIGN KEY(account_id) REFERENCES savings_accounts(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS scenarios(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- payload is the tagged JSON form of projection::Modification.
    CREATE TABLE IF NOT EXISTS scenario_modifications(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        scenario_id INTEGER NOT NULL,
        effective_date TEXT NOT NULL,
        payload TEXT NOT NULL,
        FOREIGN KEY(scenario_id) REFERENCES scenarios(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_scenario_mods_date
        ON scenario_modifications(scenario_id, effective_date);
    "#,
    )?;
    Ok(())
}

fn dec(field: &str, s: String) -> Result<rust_decimal::Decimal> {
    parse_decimal(&s).with_context(|| format!("Invalid {} '{}' in database", field, s))
}

fn dec_opt(field: &str, s: Option<String>) -> Result<Option<rust_decimal::Decimal>> {
    s.map(|v| dec(field, v)).transpose()
}

/// Load the whole household snapshot for the pure calculators. The only
/// I/O on the aggregation path; everything downstream is pure.
pub fn load_records(conn: &Connection) -> Result<Records> {
    let mut records = Records::default();

    let mut stmt = conn.prepare("SELECT id, name, age FROM persons ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?, r.get::<_, Option<u32>>(2)?))
    })?;
    for row in rows {
        let (id, name, age) = row?;
        records.persons.push(Person { id, name, age });
    }

    let mut stmt = conn
        .prepare("SELECT id, person_id, name, amount, frequency, is_active FROM income_sources")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, bool>(5)?,
        ))
    })?;
    for row in rows {
        let (id, person_id, name, amount, frequency, is_active) = row?;
        records.income_sources.push(IncomeSource {
            id,
            person_id,
            name,
            amount: dec("income amount", amount)?,
            frequency,
            is_active,
        });
    }

    let mut stmt = conn
        .prepare("SELECT id, person_id, name, amount, frequency, category, is_active FROM expenses")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, Option<i64>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, bool>(6)?,
        ))
    })?;
    for row in rows {
        let (id, person_id, name, amount, frequency, category, is_active) = row?;
        records.expenses.push(Expense {
            id,
            person_id,
            name,
            amount: dec("expense amount", amount)?,
            frequency,
            category,
            is_active,
        });
    }

    let mut stmt = conn.prepare("SELECT id, category, amount, is_fixed FROM budget_expenses")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
        ))
    })?;
    for row in rows {
        let (id, category, amount, is_fixed) = row?;
        records.budget_expenses.push(BudgetExpense {
            id,
            category,
            amount: dec("budget amount", amount)?,
            is_fixed,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, person_id, name, original_amount, current_balance, interest_rate, monthly_payment FROM loans",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;
    for row in rows {
        let (id, person_id, name, original, balance, rate, payment) = row?;
        records.loans.push(Loan {
            id,
            person_id,
            name,
            original_amount: dec("loan original amount", original)?,
            current_balance: dec("loan balance", balance)?,
            interest_rate: dec("loan interest rate", rate)?,
            monthly_payment: dec("loan monthly payment", payment)?,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, person_id, name, account_type, current_balance, interest_rate, monthly_deposit FROM savings_accounts",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;
    for row in rows {
        let (id, person_id, name, account_type, balance, rate, deposit) = row?;
        records.savings_accounts.push(SavingsAccount {
            id,
            person_id,
            name,
            account_type,
            current_balance: dec("savings balance", balance)?,
            interest_rate: dec_opt("savings interest rate", rate)?,
            monthly_deposit: dec_opt("savings monthly deposit", deposit)?,
        });
    }

    let mut stmt = conn.prepare("SELECT id, person_id, name, current_value FROM broker_accounts")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    for row in rows {
        let (id, person_id, name, value) = row?;
        records.broker_accounts.push(BrokerAccount {
            id,
            person_id,
            name,
            current_value: dec("broker value", value)?,
        });
    }

    Ok(records)
}
