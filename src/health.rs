// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::Totals;
use crate::utils::safe_div;

pub const DEFAULT_EMERGENCY_MONTHS: u32 = 3;

/// Declaration order gives Poor < Fair < Good < Excellent, so the overall
/// status is simply the minimum of the component statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Poor => "poor",
            HealthStatus::Fair => "fair",
            HealthStatus::Good => "good",
            HealthStatus::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetWorth {
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub total: Decimal,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowPeriod {
    pub income: Decimal,
    pub expenses: Decimal,
    pub debt_payments: Decimal,
    pub net_cash_flow: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlow {
    pub monthly: CashFlowPeriod,
    pub annual: CashFlowPeriod,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatioMetric {
    pub ratio: Decimal,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyFund {
    pub months_of_expenses: Decimal,
    pub target_months: Decimal,
    pub is_adequate: bool,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// None when the household has no data at all.
    pub overall_health: Option<HealthStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub net_worth: NetWorth,
    pub cash_flow: CashFlow,
    pub savings_rate: RatioMetric,
    pub debt_to_income: RatioMetric,
    pub emergency_fund: EmergencyFund,
    pub summary: Summary,
}

// Canonical status bands. All classification goes through these four
// functions so the cut-points live in one place.

fn classify_debt_to_income(ratio: Decimal) -> HealthStatus {
    if ratio < Decimal::new(20, 2) {
        HealthStatus::Excellent
    } else if ratio < Decimal::new(36, 2) {
        HealthStatus::Good
    } else if ratio < Decimal::new(43, 2) {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

fn classify_savings_rate(rate: Decimal) -> HealthStatus {
    if rate >= Decimal::new(20, 2) {
        HealthStatus::Excellent
    } else if rate >= Decimal::new(10, 2) {
        HealthStatus::Good
    } else if rate >= Decimal::ZERO {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

fn classify_emergency_fund(months: Decimal, target: Decimal) -> HealthStatus {
    if months >= target * Decimal::from(2) {
        HealthStatus::Excellent
    } else if months >= target {
        HealthStatus::Good
    } else if months >= Decimal::ONE {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

fn classify_net_worth(total: Decimal, annual_income: Decimal) -> HealthStatus {
    if !annual_income.is_zero() && total >= annual_income {
        HealthStatus::Excellent
    } else if total > Decimal::ZERO {
        HealthStatus::Good
    } else if total.is_zero() {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

/// Derive the full health report from aggregated totals. Pure; an empty
/// household yields a zeroed report with `overall_health: None` rather than
/// an error.
pub fn analyze(totals: &Totals, target_emergency_months: u32) -> HealthReport {
    let assets = totals.total_savings + totals.total_investments;
    let liabilities = totals.total_debt;
    let net = assets - liabilities;
    let annual_income = totals.monthly_income * Decimal::from(12);

    let monthly = CashFlowPeriod {
        income: totals.monthly_income,
        expenses: totals.monthly_expenses,
        debt_payments: totals.monthly_debt_payments,
        net_cash_flow: totals.net_cash_flow(),
    };
    let twelve = Decimal::from(12);
    let annual = CashFlowPeriod {
        income: monthly.income * twelve,
        expenses: monthly.expenses * twelve,
        debt_payments: monthly.debt_payments * twelve,
        net_cash_flow: monthly.net_cash_flow * twelve,
    };

    let savings_rate = safe_div(monthly.net_cash_flow, monthly.income);
    let dti = safe_div(totals.monthly_debt_payments, totals.monthly_income);

    let target = Decimal::from(target_emergency_months);
    let ef_months = safe_div(totals.total_savings, totals.monthly_expenses);

    let overall = if totals.is_empty() {
        None
    } else {
        let components = [
            classify_net_worth(net, annual_income),
            classify_savings_rate(savings_rate),
            classify_debt_to_income(dti),
            classify_emergency_fund(ef_months, target),
        ];
        // Worst-of: conservative by construction.
        components.into_iter().min()
    };

    HealthReport {
        net_worth: NetWorth {
            assets,
            liabilities,
            total: net,
            status: classify_net_worth(net, annual_income),
        },
        cash_flow: CashFlow { monthly, annual },
        savings_rate: RatioMetric {
            ratio: savings_rate,
            status: classify_savings_rate(savings_rate),
        },
        debt_to_income: RatioMetric {
            ratio: dti,
            status: classify_debt_to_income(dti),
        },
        emergency_fund: EmergencyFund {
            months_of_expenses: ef_months,
            target_months: target,
            is_adequate: ef_months >= target,
            status: classify_emergency_fund(ef_months, target),
        },
        summary: Summary {
            overall_health: overall,
        },
    }
}
