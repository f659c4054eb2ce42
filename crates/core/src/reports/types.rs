//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubdesk_shared::types::CategoryId;

use crate::category::CategoryKind;

/// A transaction row as fetched for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Positive amount.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: CategoryKind,
    /// Owning category.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Date the transaction occurred.
    pub occurred_on: NaiveDate,
}

/// Totals over a reporting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Sum of income transactions.
    pub total_income: Decimal,
    /// Sum of expense transactions.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub net: Decimal,
    /// Number of transactions covered.
    pub transaction_count: usize,
}

/// Per-category totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Income or expense.
    pub kind: CategoryKind,
    /// Sum of amounts in this category.
    pub total: Decimal,
    /// Number of transactions in this category.
    pub transaction_count: usize,
}

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Year of the bucket.
    pub year: i32,
    /// Month of the bucket (1-12).
    pub month: u32,
    /// Sum of income transactions.
    pub income: Decimal,
    /// Sum of expense transactions.
    pub expense: Decimal,
    /// `income - expense`.
    pub net: Decimal,
}
