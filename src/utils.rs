// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::frequency::Frequency;

pub const LOCALES: [&str; 2] = ["en", "sv"];
pub const CURRENCIES: [&str; 2] = ["USD", "SEK"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid decimal '{0}'")]
    InvalidDecimal(String),
    #[error("Amount '{0}' must not be negative")]
    NegativeAmount(String),
    #[error("Unknown frequency '{0}', expected monthly|yearly|weekly|bi-weekly|daily")]
    UnknownFrequency(String),
    #[error("Interest rate '{0}' out of range, expected 0..=100")]
    RateOutOfRange(String),
    #[error("Unsupported locale '{0}', expected en|sv")]
    UnsupportedLocale(String),
    #[error("Unsupported currency '{0}', expected USD|SEK")]
    UnsupportedCurrency(String),
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidDecimal(s.trim().to_string()).into())
}

/// Parse a monetary amount, rejecting negatives. Garbage never reaches the
/// calculators; they assume validated decimals.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(ValidationError::NegativeAmount(s.trim().to_string()).into());
    }
    Ok(d)
}

/// Validate a frequency label on insert, returning the canonical form.
pub fn parse_frequency(s: &str) -> Result<&'static str> {
    Frequency::parse(s)
        .map(|f| f.label())
        .ok_or_else(|| ValidationError::UnknownFrequency(s.trim().to_string()).into())
}

pub fn parse_rate(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO || d > Decimal::from(100) {
        return Err(ValidationError::RateOutOfRange(s.trim().to_string()).into());
    }
    Ok(d)
}

/// Single zero-guard used by the analyzer and goal calculator: a zero
/// denominator yields zero, never NaN or a panic.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_person(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM persons WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Person '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_goal(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM savings_goals WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Savings goal '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_savings_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM savings_accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Savings account '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_scenario(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM scenarios WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Scenario '{}' not found", name))?;
    Ok(id)
}

// Per-user preferences (settings table)
pub fn get_locale(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='locale'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "en".to_string()))
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "USD".to_string()))
}

pub fn set_locale(conn: &Connection, locale: &str) -> Result<()> {
    if !LOCALES.contains(&locale) {
        return Err(ValidationError::UnsupportedLocale(locale.to_string()).into());
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('locale', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![locale],
    )?;
    Ok(())
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    let ccy = ccy.to_uppercase();
    if !CURRENCIES.contains(&ccy.as_str()) {
        return Err(ValidationError::UnsupportedCurrency(ccy).into());
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}
