// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::ledger::{self, Operation};
use crate::models::{AppState, IncomeSourceName, Snapshot};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use tracing::warn;

/// Number of transactions `tx list` shows without `--all`/`--limit`.
pub const RECENT_LIMIT: usize = 3;

/// Load the stored state, apply `op` at `at`, save and return the new state.
/// An operation that would overflow is rejected and nothing is saved.
pub fn commit(conn: &Connection, op: &Operation, at: DateTime<Utc>) -> Result<AppState> {
    let state = db::load_or_default(conn);
    let next = state.try_apply(op, at)?;
    db::save_state(conn, &next);
    Ok(next)
}

pub fn handle_income(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("add", sub)) = m.subcommand() {
        let source = sub.get_one::<String>("source").context("source is required")?;
        let amount = parse_decimal(sub.get_one::<String>("amount").context("amount is required")?)?;
        let op = Operation::add_income(source, amount)?;
        if source.trim().parse::<IncomeSourceName>().is_err() {
            warn!(source = %source, "not a known income source; only the balance will change");
        }
        let next = commit(conn, &op, Utc::now())?;
        println!(
            "Added {} to {} (balance: {})",
            fmt_money(&amount, &settings.currency_symbol),
            source.trim(),
            fmt_money(&next.financial_data.total_balance, &settings.currency_symbol)
        );
    }
    Ok(())
}

pub fn handle_expense(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("add", sub)) = m.subcommand() {
        let category = sub.get_one::<String>("category").context("category is required")?;
        let amount = parse_decimal(sub.get_one::<String>("amount").context("amount is required")?)?;
        let op = Operation::add_expense(category, amount)?;
        let next = commit(conn, &op, Utc::now())?;
        println!(
            "Spent {} on {} (balance: {})",
            fmt_money(&amount, &settings.currency_symbol),
            ledger::expense_category(category.trim()),
            fmt_money(&next.financial_data.total_balance, &settings.currency_symbol)
        );
    }
    Ok(())
}

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, settings, sub)?,
        Some(("rm", sub)) => remove(conn, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn remove(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id is required")?;
    let state = db::load_or_default(conn);
    let Some(tx) = state.financial_data.transaction(id.trim()).cloned() else {
        println!("No transaction with id '{}'", id.trim());
        return Ok(());
    };
    let op = Operation::delete_transaction(id);
    let next = state.try_apply(&op, Utc::now())?;
    db::save_state(conn, &next);
    println!(
        "Deleted '{}' ({}); balance now {}",
        tx.title,
        fmt_money(&tx.amount, &settings.currency_symbol),
        fmt_money(&next.financial_data.total_balance, &settings.currency_symbol)
    );
    Ok(())
}

fn list(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = db::load_or_default(conn);
    let data = query_rows(&state.financial_data, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.kind == "expense" { "-" } else { "+" };
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.title.clone(),
                    r.category.clone(),
                    format!("{}{}", sign, fmt_money(&r.amount, &settings.currency_symbol)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Title", "Category", "Amount"], rows)
        );
        let total = state.financial_data.transactions.len();
        if data.len() < total {
            println!("Showing {} of {} (use --all to see every transaction)", data.len(), total);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: rust_decimal::Decimal,
}

pub fn query_rows(snapshot: &Snapshot, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let limit = if sub.get_flag("all") {
        usize::MAX
    } else {
        sub.get_one::<usize>("limit").copied().unwrap_or(RECENT_LIMIT)
    };
    snapshot
        .transactions
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.clone(),
            title: t.title.clone(),
            kind: t.kind.as_str().to_string(),
            category: t.category.clone(),
            amount: t.amount,
        })
        .collect()
}
