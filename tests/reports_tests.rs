// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use kwacha::commands::reports::{income_breakdown, personal_spending, stats, wallet};
use kwacha::ledger::Operation;
use kwacha::models::Snapshot;
use kwacha::utils::{fmt_delta, fmt_money};
use rust_decimal::Decimal;

fn at() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_754_049_600, 0).unwrap()
}

#[test]
fn stats_over_demo_log() {
    let s = stats(&Snapshot::demo().transactions);
    assert_eq!(s.total_income, Decimal::from(50_000));
    assert_eq!(s.total_expenses, Decimal::from(7_820));
    assert_eq!(s.net_flow, Decimal::from(42_180));
    assert_eq!(s.count, 5);
    assert_eq!(s.average, Decimal::new(115_640, 1));
}

#[test]
fn stats_on_empty_log_are_zero() {
    let s = stats(&[]);
    assert_eq!(s.count, 0);
    assert_eq!(s.average, Decimal::ZERO);
    assert_eq!(s.net_flow, Decimal::ZERO);
}

#[test]
fn income_breakdown_uses_chart_order() {
    let rows = income_breakdown(&Snapshot::demo());
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Salary", "Business Income", "Side Hustle"]);
    assert_eq!(rows[0].color, "#6366f1");
    assert_eq!(rows[2].amount, Decimal::new(450_050, 2));
}

#[test]
fn wallet_lists_balance_and_sources() {
    let w = wallet(&Snapshot::demo());
    assert_eq!(w.total_balance, Decimal::new(12_450_050, 2));
    assert_eq!(w.sources.len(), 3);
    assert_eq!(w.sources[0].name, "Business Income");
    assert_eq!(w.sources[0].trend, Decimal::from(12));
}

#[test]
fn personal_spending_comes_from_the_log() {
    let s = Snapshot::default()
        .apply(&Operation::add_expense("Food", Decimal::from(300)).unwrap(), at())
        .apply(&Operation::add_expense("Extras", Decimal::from(100)).unwrap(), at())
        .apply(&Operation::add_expense("Business", Decimal::from(5_000)).unwrap(), at());
    let rows = personal_spending(&s);
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Housing", "Food", "Transport", "Extras"]);

    assert_eq!(rows[0].amount, Decimal::ZERO);
    assert_eq!(rows[0].percentage, 0);
    assert_eq!(rows[0].color, "#e2e8f0");

    assert_eq!(rows[1].amount, Decimal::from(300));
    assert_eq!(rows[1].percentage, 75);
    assert_eq!(rows[1].color, "#8b5cf6");

    assert_eq!(rows[3].name, "Leisure");
    assert_eq!(rows[3].percentage, 25);
}

#[test]
fn personal_spending_rounds_half_up() {
    let s = Snapshot::default()
        .apply(&Operation::add_expense("Food", Decimal::from(1)).unwrap(), at())
        .apply(&Operation::add_expense("Housing", Decimal::from(7)).unwrap(), at());
    let rows = personal_spending(&s);
    // 1/8 = 12.5% and 7/8 = 87.5%
    assert_eq!(rows[1].percentage, 13);
    assert_eq!(rows[0].percentage, 88);
}

#[test]
fn money_is_grouped_with_two_decimals() {
    assert_eq!(fmt_money(&Decimal::new(12_450_050, 2), "K"), "K 124,500.50");
    assert_eq!(fmt_money(&Decimal::ZERO, "K"), "K 0.00");
    assert_eq!(fmt_money(&Decimal::new(-1_234_567, 3), "K"), "K -1,234.57");
    assert_eq!(fmt_money(&Decimal::from(999), "$"), "$ 999.00");
    assert_eq!(fmt_money(&Decimal::from(1_000_000), "K"), "K 1,000,000.00");
}

#[test]
fn deltas_carry_a_leading_sign() {
    assert_eq!(fmt_delta(&Decimal::from(2_000), "K"), "+K 2,000.00");
    assert_eq!(fmt_delta(&Decimal::from(-1_000), "K"), "-K 1,000.00");
    assert_eq!(fmt_delta(&Decimal::ZERO, "K"), "+K 0.00");
}

#[test]
fn stats_saturate_instead_of_overflowing() {
    let mut demo = Snapshot::demo();
    for tx in demo.transactions.iter_mut() {
        tx.amount = Decimal::MAX;
    }
    let s = stats(&demo.transactions);
    assert_eq!(s.total_income, Decimal::MAX);
    assert_eq!(s.count, 5);
}
