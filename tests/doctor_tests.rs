// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use kwacha::commands::doctor::diagnose;
use kwacha::ledger::Operation;
use kwacha::models::Snapshot;
use rust_decimal::Decimal;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_754_049_600 + secs, 0).unwrap()
}

#[test]
fn logged_operations_leave_no_drift() {
    let s = Snapshot::default()
        .apply(&Operation::add_income("Salary", Decimal::from(900)).unwrap(), at(0))
        .apply(&Operation::add_expense("Extras", Decimal::from(50)).unwrap(), at(1))
        .apply(&Operation::add_expense("Gym", Decimal::from(20)).unwrap(), at(2));
    assert!(diagnose(&s).is_empty());
}

#[test]
fn salary_edit_shows_as_drift() {
    let s = Snapshot::default()
        .apply(&Operation::update_profile("X", Decimal::from(3_000)).unwrap(), at(0));
    let kinds: Vec<&str> = diagnose(&s).iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec!["source_drift", "balance_drift"]);
}

#[test]
fn duplicate_ids_are_reported() {
    let mut s = Snapshot::default()
        .apply(&Operation::add_expense("Food", Decimal::from(5)).unwrap(), at(0));
    let dup = s.transactions[0].clone();
    s.transactions.push(dup);
    let issues = diagnose(&s);
    assert!(issues.iter().any(|i| i.kind == "duplicate_id"));
}
