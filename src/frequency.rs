// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

/// Recurrence period of a monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Yearly,
    Weekly,
    BiWeekly,
    Daily,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Monthly,
        Frequency::Yearly,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Daily,
    ];

    pub fn parse(label: &str) -> Option<Frequency> {
        match label.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            "weekly" => Some(Frequency::Weekly),
            "bi-weekly" => Some(Frequency::BiWeekly),
            "daily" => Some(Frequency::Daily),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Daily => "daily",
        }
    }
}

/// Convert a recurring amount to its monthly equivalent.
///
/// Weekly/bi-weekly/daily use fixed average-weeks-per-month approximations
/// (4.33, 2.17, 30) rather than calendar math; the constants are part of the
/// stored-data contract and must not change. An unrecognized label
/// contributes zero; `doctor` reports such rows as data-quality issues.
pub fn monthly_amount(amount: Decimal, label: &str) -> Decimal {
    match Frequency::parse(label) {
        Some(Frequency::Monthly) => amount,
        Some(Frequency::Yearly) => amount / Decimal::from(12),
        Some(Frequency::Weekly) => amount * Decimal::new(433, 2),
        Some(Frequency::BiWeekly) => amount * Decimal::new(217, 2),
        Some(Frequency::Daily) => amount * Decimal::from(30),
        None => Decimal::ZERO,
    }
}
