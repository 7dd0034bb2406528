// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger reconciliation.
//!
//! Every change to the financial state goes through [`reduce`], which takes the
//! previous [`Snapshot`] and an [`Operation`] and returns a new snapshot. The
//! balance, the income sources and the spending categories are caches of the
//! transaction log and are kept in step with it here.

use crate::error::LedgerError;
use crate::models::{
    AppState, IncomeSourceName, Snapshot, SpendingCategory, Transaction, TxKind,
    DEFAULT_CATEGORY_COLOR,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Expenses filed under this name are booked to [`LEISURE`].
pub const EXTRAS: &str = "Extras";
pub const LEISURE: &str = "Leisure";

const EXPENSE_ICON: &str = "shopping-cart";
const INCOME_ICON: &str = "trending-up";

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    UpdateProfile { name: String, salary: Decimal },
    AddExpense { category: String, amount: Decimal },
    AddIncome { category: String, amount: Decimal },
    DeleteTransaction { id: String },
}

impl Operation {
    pub fn update_profile(name: &str, salary: Decimal) -> Result<Self, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if salary < Decimal::ZERO {
            return Err(LedgerError::NegativeSalary(salary));
        }
        Ok(Operation::UpdateProfile {
            name: name.to_string(),
            salary,
        })
    }

    pub fn add_expense(category: &str, amount: Decimal) -> Result<Self, LedgerError> {
        let category = checked_category(category)?;
        check_positive(amount)?;
        Ok(Operation::AddExpense { category, amount })
    }

    pub fn add_income(category: &str, amount: Decimal) -> Result<Self, LedgerError> {
        let category = checked_category(category)?;
        check_positive(amount)?;
        Ok(Operation::AddIncome { category, amount })
    }

    pub fn delete_transaction(id: &str) -> Self {
        Operation::DeleteTransaction {
            id: id.trim().to_string(),
        }
    }
}

fn checked_category(category: &str) -> Result<String, LedgerError> {
    let category = category.trim();
    if category.is_empty() {
        Err(LedgerError::EmptyCategory)
    } else {
        Ok(category.to_string())
    }
}

fn check_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(LedgerError::NonPositiveAmount(amount))
    }
}

/// Resolve the spending category an expense is booked to.
pub fn expense_category(category: &str) -> &str {
    if category == EXTRAS { LEISURE } else { category }
}

/// Apply `op` to `snapshot` at event time `at`.
///
/// Total over its inputs: an unknown transaction id or income source leaves the
/// affected part of the snapshot untouched, and so does an operation whose
/// arithmetic would overflow.
pub fn reduce(snapshot: &Snapshot, op: &Operation, at: DateTime<Utc>) -> Snapshot {
    try_reduce(snapshot, op, at).unwrap_or_else(|e| {
        warn!("Ignoring operation: {e}");
        snapshot.clone()
    })
}

/// Like [`reduce`], but reports an overflowing operation instead of ignoring it.
pub fn try_reduce(
    snapshot: &Snapshot,
    op: &Operation,
    at: DateTime<Utc>,
) -> Result<Snapshot, LedgerError> {
    let next = match op {
        Operation::UpdateProfile { salary, .. } => update_salary(snapshot, *salary),
        Operation::AddExpense { category, amount } => add_expense(snapshot, category, *amount, at),
        Operation::AddIncome { category, amount } => add_income(snapshot, category, *amount, at),
        Operation::DeleteTransaction { id } => delete_transaction(snapshot, id),
    };
    next.ok_or(LedgerError::Overflow)
}

impl Snapshot {
    pub fn apply(&self, op: &Operation, at: DateTime<Utc>) -> Snapshot {
        reduce(self, op, at)
    }

    pub fn try_apply(&self, op: &Operation, at: DateTime<Utc>) -> Result<Snapshot, LedgerError> {
        try_reduce(self, op, at)
    }
}

impl AppState {
    pub fn apply(&self, op: &Operation, at: DateTime<Utc>) -> AppState {
        self.try_apply(op, at).unwrap_or_else(|e| {
            warn!("Ignoring operation: {e}");
            self.clone()
        })
    }

    pub fn try_apply(&self, op: &Operation, at: DateTime<Utc>) -> Result<AppState, LedgerError> {
        let financial_data = try_reduce(&self.financial_data, op, at)?;
        let user_name = match op {
            Operation::UpdateProfile { name, .. } => name.clone(),
            _ => self.user_name.clone(),
        };
        Ok(AppState {
            user_name,
            financial_data,
        })
    }
}

// Salary edits move the balance without writing a transaction.
fn update_salary(snapshot: &Snapshot, salary: Decimal) -> Option<Snapshot> {
    let old = snapshot
        .income_source(IncomeSourceName::Salary)
        .map(|s| s.amount)
        .unwrap_or(Decimal::ZERO);
    let delta = salary.checked_sub(old)?;
    debug!(%old, %salary, %delta, "updating salary");

    let mut next = snapshot.clone();
    next.total_balance = next.total_balance.checked_add(delta)?;
    for source in next
        .income_sources
        .iter_mut()
        .filter(|s| s.name == IncomeSourceName::Salary)
    {
        source.amount = salary;
    }
    Some(next)
}

fn add_expense(
    snapshot: &Snapshot,
    category: &str,
    amount: Decimal,
    at: DateTime<Utc>,
) -> Option<Snapshot> {
    let target = expense_category(category);
    let mut next = snapshot.clone();
    next.total_balance = next.total_balance.checked_sub(amount)?;

    match next.spending_categories.iter_mut().find(|c| c.name == target) {
        Some(cat) => cat.amount = cat.amount.checked_add(amount)?,
        None => {
            debug!(category = target, "creating spending category");
            next.spending_categories.push(SpendingCategory {
                name: target.to_string(),
                amount,
                color: DEFAULT_CATEGORY_COLOR.to_string(),
            });
        }
    }

    let tx = Transaction {
        id: next_transaction_id(snapshot, at),
        title: format!("{} Expense", category),
        amount,
        date: display_date(at),
        kind: TxKind::Expense,
        category: target.to_string(),
        icon: Some(EXPENSE_ICON.to_string()),
    };
    debug!(id = %tx.id, %amount, category = target, "recorded expense");
    next.transactions.insert(0, tx);
    Some(next)
}

fn add_income(
    snapshot: &Snapshot,
    category: &str,
    amount: Decimal,
    at: DateTime<Utc>,
) -> Option<Snapshot> {
    let mut next = snapshot.clone();
    next.total_balance = next.total_balance.checked_add(amount)?;

    let mut matched = false;
    for source in next
        .income_sources
        .iter_mut()
        .filter(|s| s.name.as_str() == category)
    {
        source.amount = source.amount.checked_add(amount)?;
        matched = true;
    }
    if !matched {
        debug!(category, "no income source matches; only the balance changes");
    }

    let tx = Transaction {
        id: next_transaction_id(snapshot, at),
        title: format!("{} Added", category),
        amount,
        date: display_date(at),
        kind: TxKind::Income,
        category: category.to_string(),
        icon: Some(INCOME_ICON.to_string()),
    };
    debug!(id = %tx.id, %amount, category, "recorded income");
    next.transactions.insert(0, tx);
    Some(next)
}

// Approximate inverse of the add operations: cached amounts are floored at
// zero and emptied categories are kept.
fn delete_transaction(snapshot: &Snapshot, id: &str) -> Option<Snapshot> {
    let Some(tx) = snapshot.transaction(id) else {
        debug!(id, "transaction not found; nothing to delete");
        return Some(snapshot.clone());
    };

    let mut next = snapshot.clone();
    match tx.kind {
        TxKind::Income => {
            next.total_balance = next.total_balance.checked_sub(tx.amount)?;
            for source in next
                .income_sources
                .iter_mut()
                .filter(|s| s.name.as_str() == tx.category)
            {
                source.amount = floored_sub(source.amount, tx.amount)?;
            }
        }
        TxKind::Expense => {
            next.total_balance = next.total_balance.checked_add(tx.amount)?;
            for cat in next
                .spending_categories
                .iter_mut()
                .filter(|c| c.name == tx.category)
            {
                cat.amount = floored_sub(cat.amount, tx.amount)?;
            }
        }
    }
    next.transactions.retain(|t| t.id != id);
    debug!(id, kind = tx.kind.as_str(), amount = %tx.amount, "deleted transaction");
    Some(next)
}

fn floored_sub(cached: Decimal, amount: Decimal) -> Option<Decimal> {
    cached.checked_sub(amount).map(|v| v.max(Decimal::ZERO))
}

/// `t-<unix millis>`, suffixed with `-N` when that id is already taken.
pub fn next_transaction_id(snapshot: &Snapshot, at: DateTime<Utc>) -> String {
    let base = format!("t-{}", at.timestamp_millis());
    if snapshot.transaction(&base).is_none() {
        return base;
    }
    (1u32..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| snapshot.transaction(candidate).is_none())
        .unwrap_or(base)
}

pub fn display_date(at: DateTime<Utc>) -> String {
    at.format("%b %d, %H:%M").to_string()
}
