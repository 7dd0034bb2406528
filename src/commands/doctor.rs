// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Snapshot, TxKind};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(conn: &Connection) -> Result<()> {
    let state = db::load_or_default(conn);
    let issues = diagnose(&state.financial_data);
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Recompute the cached totals from the transaction log and report where they
/// disagree. Salary edits and floored deletions both show up here.
pub fn diagnose(snapshot: &Snapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for t in &snapshot.transactions {
        if !seen.insert(t.id.as_str()) {
            issues.push(Issue {
                kind: "duplicate_id",
                detail: t.id.clone(),
            });
        }
        if t.amount <= Decimal::ZERO {
            issues.push(Issue {
                kind: "non_positive_amount",
                detail: format!("{} {}", t.id, t.amount),
            });
        }
    }

    let logged = |kind: TxKind, category: &str| -> Decimal {
        snapshot
            .transactions
            .iter()
            .filter(|t| t.kind == kind && t.category == category)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    };

    for cat in &snapshot.spending_categories {
        let expected = logged(TxKind::Expense, &cat.name);
        if expected != cat.amount {
            issues.push(Issue {
                kind: "category_drift",
                detail: format!("{}: cached {} vs log {}", cat.name, cat.amount, expected),
            });
        }
    }
    for src in &snapshot.income_sources {
        let expected = logged(TxKind::Income, src.name.as_str());
        if expected != src.amount {
            issues.push(Issue {
                kind: "source_drift",
                detail: format!("{}: cached {} vs log {}", src.name, src.amount, expected),
            });
        }
    }

    let net = snapshot
        .transactions
        .iter()
        .fold(Decimal::ZERO, |acc, t| match t.kind {
            TxKind::Income => acc.saturating_add(t.amount),
            TxKind::Expense => acc.saturating_sub(t.amount),
        });
    if net != snapshot.total_balance {
        issues.push(Issue {
            kind: "balance_drift",
            detail: format!(
                "balance {} vs log {} (difference {})",
                snapshot.total_balance,
                net,
                snapshot.total_balance.saturating_sub(net)
            ),
        });
    }
    issues
}
