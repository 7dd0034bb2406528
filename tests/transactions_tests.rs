// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use kwacha::commands::transactions::{self, commit};
use kwacha::ledger::Operation;
use kwacha::models::Snapshot;
use kwacha::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn list_rows(snapshot: &Snapshot, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["kwacha", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(snapshot, list_m);
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_defaults_to_three_most_recent() {
    let rows = list_rows(&Snapshot::demo(), &[]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, "t1");
    assert_eq!(rows[2].id, "t3");
}

#[test]
fn list_limit_and_all_respected() {
    let demo = Snapshot::demo();
    assert_eq!(list_rows(&demo, &["--limit", "2"]).len(), 2);
    let all = list_rows(&demo, &["--all"]);
    assert_eq!(all.len(), 5);
    assert_eq!(all[1].kind, "income");
}

#[test]
fn commit_persists_each_operation() {
    let conn = setup();
    let t = DateTime::<Utc>::from_timestamp(1_754_049_600, 0).unwrap();
    commit(
        &conn,
        &Operation::add_income("Salary", Decimal::from(10_000)).unwrap(),
        t,
    )
    .unwrap();
    let state = commit(
        &conn,
        &Operation::add_expense("Food", Decimal::from(2_000)).unwrap(),
        t,
    )
    .unwrap();
    assert_eq!(state.financial_data.total_balance, Decimal::from(8_000));
    assert_eq!(db::load_or_default(&conn), state);

    let food = state.financial_data.transactions[0].id.clone();
    let after = commit(&conn, &Operation::delete_transaction(&food), t).unwrap();
    assert_eq!(after.financial_data.total_balance, Decimal::from(10_000));
    assert_eq!(db::load_or_default(&conn).financial_data.transactions.len(), 1);
}

#[test]
fn cli_accepts_spaced_source_names() {
    let matches =
        cli::build_cli().get_matches_from(["kwacha", "income", "add", "Side Hustle", "250"]);
    let (_, income_m) = matches.subcommand().unwrap();
    let (_, add_m) = income_m.subcommand().unwrap();
    assert_eq!(add_m.get_one::<String>("source").unwrap(), "Side Hustle");
    assert_eq!(add_m.get_one::<String>("amount").unwrap(), "250");
}

#[test]
fn cli_rejects_all_with_limit() {
    let res = cli::build_cli().try_get_matches_from(["kwacha", "tx", "list", "--all", "--limit", "2"]);
    assert!(res.is_err());
}

#[test]
fn commit_rejects_overflow_without_saving() {
    let conn = setup();
    let t = DateTime::<Utc>::from_timestamp(1_754_049_600, 0).unwrap();
    let op = Operation::add_income("Salary", Decimal::MAX).unwrap();
    let first = commit(&conn, &op, t).unwrap();
    assert_eq!(first.financial_data.total_balance, Decimal::MAX);

    assert!(commit(&conn, &op, t).is_err());
    assert_eq!(db::load_or_default(&conn), first);
}
