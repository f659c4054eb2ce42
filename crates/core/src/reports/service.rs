//! Report generation service.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use clubdesk_shared::types::CategoryId;

use crate::category::CategoryKind;

use super::types::{CategoryTotal, FinanceSummary, MonthlyTotal, TransactionRow};

/// Service for aggregating transaction rows into reports.
pub struct ReportService;

impl ReportService {
    /// Totals income, expense, and net over the given rows.
    #[must_use]
    pub fn summarize(rows: &[TransactionRow]) -> FinanceSummary {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;

        for row in rows {
            match row.kind {
                CategoryKind::Income => total_income += row.amount,
                CategoryKind::Expense => total_expense += row.amount,
            }
        }

        FinanceSummary {
            total_income,
            total_expense,
            net: total_income - total_expense,
            transaction_count: rows.len(),
        }
    }

    /// Groups rows by category, largest totals first.
    #[must_use]
    pub fn by_category(rows: &[TransactionRow]) -> Vec<CategoryTotal> {
        let mut buckets: BTreeMap<CategoryId, CategoryTotal> = BTreeMap::new();

        for row in rows {
            buckets
                .entry(row.category_id)
                .and_modify(|bucket| {
                    bucket.total += row.amount;
                    bucket.transaction_count += 1;
                })
                .or_insert_with(|| CategoryTotal {
                    category_id: row.category_id,
                    category_name: row.category_name.clone(),
                    kind: row.kind,
                    total: row.amount,
                    transaction_count: 1,
                });
        }

        let mut totals: Vec<CategoryTotal> = buckets.into_values().collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        totals
    }

    /// Buckets rows into calendar months, oldest first.
    #[must_use]
    pub fn monthly(rows: &[TransactionRow]) -> Vec<MonthlyTotal> {
        let mut buckets: BTreeMap<(i32, u32), MonthlyTotal> = BTreeMap::new();

        for row in rows {
            let key = (row.occurred_on.year(), row.occurred_on.month());
            let bucket = buckets.entry(key).or_insert_with(|| MonthlyTotal {
                year: key.0,
                month: key.1,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                net: Decimal::ZERO,
            });

            match row.kind {
                CategoryKind::Income => bucket.income += row.amount,
                CategoryKind::Expense => bucket.expense += row.amount,
            }
            bucket.net = bucket.income - bucket.expense;
        }

        buckets.into_values().collect()
    }
}
