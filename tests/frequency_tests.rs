// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kassabok::frequency::{monthly_amount, Frequency};
use rust_decimal::Decimal;

#[test]
fn monthly_is_identity() {
    let amounts = ["0", "1", "28900", "1234.56"];
    for a in amounts {
        let d = a.parse::<Decimal>().unwrap();
        assert_eq!(monthly_amount(d, "monthly"), d);
    }
}

#[test]
fn yearly_divides_by_twelve() {
    assert_eq!(
        monthly_amount(Decimal::from(1200), "yearly"),
        Decimal::from(100)
    );
    assert_eq!(
        monthly_amount(Decimal::from(405600), "yearly"),
        Decimal::from(33800)
    );
}

#[test]
fn weekly_uses_fixed_approximation() {
    // 100 * 4.33, not calendar math
    assert_eq!(
        monthly_amount(Decimal::from(100), "weekly"),
        Decimal::from(433)
    );
}

#[test]
fn biweekly_uses_fixed_approximation() {
    assert_eq!(
        monthly_amount(Decimal::from(100), "bi-weekly"),
        Decimal::from(217)
    );
}

#[test]
fn daily_multiplies_by_thirty() {
    assert_eq!(
        monthly_amount(Decimal::from(10), "daily"),
        Decimal::from(300)
    );
}

#[test]
fn unknown_label_contributes_zero() {
    assert_eq!(
        monthly_amount(Decimal::from(5000), "fortnightly"),
        Decimal::ZERO
    );
    assert_eq!(monthly_amount(Decimal::from(5000), ""), Decimal::ZERO);
}

#[test]
fn labels_are_case_insensitive_and_trimmed() {
    assert_eq!(Frequency::parse(" Monthly "), Some(Frequency::Monthly));
    assert_eq!(Frequency::parse("BI-WEEKLY"), Some(Frequency::BiWeekly));
    assert_eq!(Frequency::parse("biweekly"), None);
}

#[test]
fn nonnegative_amounts_stay_nonnegative() {
    let amounts = ["0", "0.01", "99999.99"];
    for f in Frequency::ALL {
        for a in amounts {
            let d = a.parse::<Decimal>().unwrap();
            assert!(monthly_amount(d, f.label()) >= Decimal::ZERO);
        }
    }
}
