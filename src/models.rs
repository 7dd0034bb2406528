// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_USER_NAME: &str = "Mwape Katongo";
pub const DEFAULT_CATEGORY_COLOR: &str = "#10b981";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeSourceName {
    #[serde(rename = "Business Income")]
    BusinessIncome,
    Salary,
    #[serde(rename = "Side Hustle")]
    SideHustle,
}

impl IncomeSourceName {
    pub const ALL: [IncomeSourceName; 3] = [
        IncomeSourceName::BusinessIncome,
        IncomeSourceName::Salary,
        IncomeSourceName::SideHustle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessIncome => "Business Income",
            Self::Salary => "Salary",
            Self::SideHustle => "Side Hustle",
        }
    }
}

impl fmt::Display for IncomeSourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeSourceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| format!("Unknown income source '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: String,
    pub name: IncomeSourceName,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Percentage change.
    #[serde(with = "rust_decimal::serde::float")]
    pub trend: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingCategory {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Display string, not a parseable timestamp.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    pub income_sources: Vec<IncomeSource>,
    pub spending_categories: Vec<SpendingCategory>,
    /// Newest first.
    #[serde(rename = "recentTransactions", alias = "transactions")]
    pub transactions: Vec<Transaction>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            total_balance: Decimal::ZERO,
            income_sources: IncomeSourceName::ALL
                .into_iter()
                .enumerate()
                .map(|(i, name)| IncomeSource {
                    id: (i + 1).to_string(),
                    name,
                    amount: Decimal::ZERO,
                    trend: Decimal::ZERO,
                })
                .collect(),
            spending_categories: default_categories(&[0, 0, 0, 0, 0]),
            transactions: Vec::new(),
        }
    }
}

const CATEGORY_PALETTE: [(&str, &str); 5] = [
    ("Business", "#3b82f6"),
    ("Housing", "#6366f1"),
    ("Food", "#8b5cf6"),
    ("Transport", "#ec4899"),
    ("Leisure", "#10b981"),
];

fn default_categories(amounts: &[i64; 5]) -> Vec<SpendingCategory> {
    CATEGORY_PALETTE
        .iter()
        .zip(amounts)
        .map(|((name, color), amt)| SpendingCategory {
            name: name.to_string(),
            amount: Decimal::from(*amt),
            color: color.to_string(),
        })
        .collect()
}

impl Snapshot {
    /// Sample data for trying the reports without entering anything.
    pub fn demo() -> Self {
        let source = |id: &str, name, amount: Decimal, trend: i64| IncomeSource {
            id: id.to_string(),
            name,
            amount,
            trend: Decimal::from(trend),
        };
        let tx = |id: &str, title: &str, amount: i64, date: &str, kind, category: &str, icon: &str| {
            Transaction {
                id: id.to_string(),
                title: title.to_string(),
                amount: Decimal::from(amount),
                date: date.to_string(),
                kind,
                category: category.to_string(),
                icon: Some(icon.to_string()),
            }
        };
        Snapshot {
            total_balance: Decimal::new(12_450_050, 2),
            income_sources: vec![
                source("1", IncomeSourceName::BusinessIncome, Decimal::from(85_000), 12),
                source("2", IncomeSourceName::Salary, Decimal::from(35_000), 0),
                source("3", IncomeSourceName::SideHustle, Decimal::new(450_050, 2), 5),
            ],
            spending_categories: default_categories(&[45_000, 15_000, 8_000, 5_000, 4_000]),
            transactions: vec![
                tx("t1", "Office Supplies", 4_500, "Today", TxKind::Expense, "Business", "briefcase"),
                tx("t2", "Monthly Salary", 35_000, "Yesterday", TxKind::Income, "Salary", "wallet"),
                tx("t3", "Uber Ride", 120, "Yesterday", TxKind::Expense, "Transport", "car"),
                tx("t4", "Grocery Shopping", 3_200, "Oct 24", TxKind::Expense, "Food", "shopping-cart"),
                tx("t5", "Client Payment", 15_000, "Oct 22", TxKind::Income, "Business", "trending-up"),
            ],
        }
    }

    pub fn income_source(&self, name: IncomeSourceName) -> Option<&IncomeSource> {
        self.income_sources.iter().find(|s| s.name == name)
    }

    pub fn category(&self, name: &str) -> Option<&SpendingCategory> {
        self.spending_categories.iter().find(|c| c.name == name)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

/// The record persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user_name: String,
    pub financial_data: Snapshot,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            user_name: DEFAULT_USER_NAME.to_string(),
            financial_data: Snapshot::default(),
        }
    }
}
