// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::commit;
use crate::config::Settings;
use crate::db;
use crate::ledger::Operation;
use crate::models::IncomeSourceName;
use crate::utils::{fmt_delta, fmt_money, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let name = sub.get_one::<String>("name").context("name is required")?;
            let salary =
                parse_decimal(sub.get_one::<String>("salary").context("salary is required")?)?;
            let before = db::load_or_default(conn).financial_data.total_balance;
            let op = Operation::update_profile(name, salary)?;
            let next = commit(conn, &op, Utc::now())?;
            let balance = next.financial_data.total_balance;
            println!(
                "Profile saved for {}; salary {} (balance {}, {})",
                next.user_name,
                fmt_money(&salary, &settings.currency_symbol),
                fmt_money(&balance, &settings.currency_symbol),
                fmt_delta(&balance.saturating_sub(before), &settings.currency_symbol)
            );
        }
        Some(("show", _)) | None => {
            let state = db::load_or_default(conn);
            let salary = state
                .financial_data
                .income_source(IncomeSourceName::Salary)
                .map(|s| s.amount)
                .unwrap_or(Decimal::ZERO);
            println!(
                "{}",
                pretty_table(
                    &["Name", "Initials", "Salary"],
                    vec![vec![
                        state.user_name.clone(),
                        initials(&state.user_name),
                        fmt_money(&salary, &settings.currency_symbol),
                    ]],
                )
            );
        }
        _ => {}
    }
    Ok(())
}

/// First letter of the first and second words.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .collect()
}
