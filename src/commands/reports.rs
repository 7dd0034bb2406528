// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::ledger::LEISURE;
use crate::models::{IncomeSourceName, Snapshot, Transaction, TxKind};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const FALLBACK_COLOR: &str = "#e2e8f0";

/// Categories shown in the personal spending breakdown, with display labels.
const PERSONAL_CATEGORIES: [(&str, &str, &str); 4] = [
    ("Housing", "Housing", "#6366f1"),
    ("Food", "Food", "#8b5cf6"),
    ("Transport", "Transport", "#ec4899"),
    (LEISURE, "Extras", "#10b981"),
];

/// Chart order for income sources.
const INCOME_ORDER: [(IncomeSourceName, &str); 3] = [
    (IncomeSourceName::Salary, "#6366f1"),
    (IncomeSourceName::BusinessIncome, "#3b82f6"),
    (IncomeSourceName::SideHustle, "#10b981"),
];

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let state = db::load_or_default(conn);
    let snapshot = &state.financial_data;
    let sym = settings.currency_symbol.as_str();
    match m.subcommand() {
        Some(("stats", sub)) => {
            let s = stats(&snapshot.transactions);
            if !json_out(sub, &s)? {
                let rows = vec![
                    vec!["Total Income".into(), fmt_money(&s.total_income, sym)],
                    vec!["Total Expenses".into(), fmt_money(&s.total_expenses, sym)],
                    vec!["Net Flow".into(), fmt_money(&s.net_flow, sym)],
                    vec!["Transactions".into(), s.count.to_string()],
                    vec!["Average".into(), fmt_money(&s.average, sym)],
                ];
                println!("{}", pretty_table(&["Metric", "Value"], rows));
            }
        }
        Some(("wallet", sub)) => {
            let w = wallet(snapshot);
            if !json_out(sub, &w)? {
                let mut rows: Vec<Vec<String>> = w
                    .sources
                    .iter()
                    .map(|s| vec![s.name.clone(), fmt_money(&s.amount, sym)])
                    .collect();
                rows.push(vec!["Total Balance".into(), fmt_money(&w.total_balance, sym)]);
                println!("{}", pretty_table(&["Wallet", "Amount"], rows));
            }
        }
        Some(("income", sub)) => {
            let data = income_breakdown(snapshot);
            if !json_out(sub, &data)? {
                let rows = data
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            fmt_money(&s.amount, sym),
                            format!("{}%", s.trend),
                            s.color.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Source", "Amount", "Trend", "Color"], rows));
            }
        }
        Some(("spending", sub)) => {
            let personal = personal_spending(snapshot);
            if !json_out(sub, &personal)? {
                let rows = personal
                    .iter()
                    .map(|c| {
                        vec![
                            c.label.clone(),
                            fmt_money(&c.amount, sym),
                            format!("{}%", c.percentage),
                            c.color.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Personal", "Spent", "Share", "Color"], rows)
                );
                let cached = snapshot
                    .spending_categories
                    .iter()
                    .map(|c| vec![c.name.clone(), fmt_money(&c.amount, sym), c.color.clone()])
                    .collect();
                println!("{}", pretty_table(&["Category", "Total", "Color"], cached));
            }
        }
        _ => {}
    }
    Ok(())
}

fn json_out<T: Serialize>(sub: &clap::ArgMatches, v: &T) -> Result<bool> {
    maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), v)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_flow: Decimal,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average: Decimal,
}

pub fn stats(transactions: &[Transaction]) -> Stats {
    let sum = |kind: TxKind| -> Decimal {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    };
    let total_income = sum(TxKind::Income);
    let total_expenses = sum(TxKind::Expense);
    let count = transactions.len();
    let average = if count > 0 {
        total_income.saturating_add(total_expenses) / Decimal::from(count)
    } else {
        Decimal::ZERO
    };
    Stats {
        total_income,
        total_expenses,
        net_flow: total_income.saturating_sub(total_expenses),
        count,
        average,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRow {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub trend: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    pub sources: Vec<SourceRow>,
}

pub fn wallet(snapshot: &Snapshot) -> Wallet {
    Wallet {
        total_balance: snapshot.total_balance,
        sources: snapshot
            .income_sources
            .iter()
            .map(|s| SourceRow {
                name: s.name.to_string(),
                amount: s.amount,
                trend: s.trend,
                color: income_color(s.name).to_string(),
            })
            .collect(),
    }
}

fn income_color(name: IncomeSourceName) -> &'static str {
    INCOME_ORDER
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(FALLBACK_COLOR)
}

/// Sources in chart order; sources missing from the snapshot are skipped.
pub fn income_breakdown(snapshot: &Snapshot) -> Vec<SourceRow> {
    INCOME_ORDER
        .iter()
        .filter_map(|(name, color)| {
            snapshot.income_source(*name).map(|s| SourceRow {
                name: s.name.to_string(),
                amount: s.amount,
                trend: s.trend,
                color: color.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub color: String,
    pub percentage: u32,
}

/// Spending on Housing, Food, Transport and Leisure, summed from the expense
/// log rather than the cached category totals.
pub fn personal_spending(snapshot: &Snapshot) -> Vec<CategoryShare> {
    let spent: Vec<Decimal> = PERSONAL_CATEGORIES
        .iter()
        .map(|(name, _, _)| {
            snapshot
                .transactions
                .iter()
                .filter(|t| t.kind == TxKind::Expense && t.category == *name)
                .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
        })
        .collect();
    let total = spent
        .iter()
        .fold(Decimal::ZERO, |acc, d| acc.saturating_add(*d));

    PERSONAL_CATEGORIES
        .iter()
        .zip(spent)
        .map(|((name, label, color), amount)| {
            let has_spend = snapshot
                .transactions
                .iter()
                .any(|t| t.kind == TxKind::Expense && t.category == *name);
            let percentage = if total > Decimal::ZERO {
                (amount / total * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_u32()
                    .unwrap_or(0)
            } else {
                0
            };
            CategoryShare {
                name: name.to_string(),
                label: label.to_string(),
                amount,
                color: (if has_spend { *color } else { FALLBACK_COLOR }).to_string(),
                percentage,
            }
        })
        .collect()
}
