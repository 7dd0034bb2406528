// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised when user input is turned into a ledger [`Operation`],
/// or when applying one would overflow a cached total.
///
/// [`Operation`]: crate::ledger::Operation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Salary cannot be negative, got {0}")]
    NegativeSalary(Decimal),
    #[error("Category name cannot be empty")]
    EmptyCategory,
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Amount is too large for the ledger totals")]
    Overflow,
}
