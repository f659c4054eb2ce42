use chrono::NaiveDate;
use rust_decimal_macros::dec;

use clubdesk_shared::types::CategoryId;

use crate::category::CategoryKind;

use super::service::ReportService;
use super::types::TransactionRow;

fn row(
    amount: rust_decimal::Decimal,
    kind: CategoryKind,
    category: (CategoryId, &str),
    date: (i32, u32, u32),
) -> TransactionRow {
    TransactionRow {
        amount,
        kind,
        category_id: category.0,
        category_name: category.1.to_string(),
        occurred_on: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
}

#[test]
fn test_summarize_empty() {
    let summary = ReportService::summarize(&[]);
    assert_eq!(summary.total_income, dec!(0));
    assert_eq!(summary.total_expense, dec!(0));
    assert_eq!(summary.net, dec!(0));
    assert_eq!(summary.transaction_count, 0);
}

#[test]
fn test_summarize_mixed_rows() {
    let fees = (CategoryId::new(), "Membership fees");
    let travel = (CategoryId::new(), "Travel");

    let rows = vec![
        row(dec!(500.00), CategoryKind::Income, fees, (2026, 3, 1)),
        row(dec!(120.00), CategoryKind::Income, fees, (2026, 3, 15)),
        row(dec!(200.00), CategoryKind::Expense, travel, (2026, 3, 20)),
    ];

    let summary = ReportService::summarize(&rows);
    assert_eq!(summary.total_income, dec!(620.00));
    assert_eq!(summary.total_expense, dec!(200.00));
    assert_eq!(summary.net, dec!(420.00));
    assert_eq!(summary.transaction_count, 3);
}

#[test]
fn test_summarize_negative_net() {
    let travel = (CategoryId::new(), "Travel");
    let rows = vec![row(dec!(300.00), CategoryKind::Expense, travel, (2026, 1, 5))];

    let summary = ReportService::summarize(&rows);
    assert_eq!(summary.net, dec!(-300.00));
}

#[test]
fn test_by_category_groups_and_sorts() {
    let fees = (CategoryId::new(), "Membership fees");
    let travel = (CategoryId::new(), "Travel");
    let kit = (CategoryId::new(), "Kit");

    let rows = vec![
        row(dec!(100.00), CategoryKind::Income, fees, (2026, 2, 1)),
        row(dec!(50.00), CategoryKind::Income, fees, (2026, 2, 2)),
        row(dec!(400.00), CategoryKind::Expense, travel, (2026, 2, 3)),
        row(dec!(20.00), CategoryKind::Expense, kit, (2026, 2, 4)),
    ];

    let totals = ReportService::by_category(&rows);
    assert_eq!(totals.len(), 3);

    // Largest total first.
    assert_eq!(totals[0].category_id, travel.0);
    assert_eq!(totals[0].total, dec!(400.00));
    assert_eq!(totals[0].transaction_count, 1);

    assert_eq!(totals[1].category_id, fees.0);
    assert_eq!(totals[1].total, dec!(150.00));
    assert_eq!(totals[1].transaction_count, 2);
    assert_eq!(totals[1].category_name, "Membership fees");

    assert_eq!(totals[2].category_id, kit.0);
}

#[test]
fn test_monthly_buckets_in_order() {
    let fees = (CategoryId::new(), "Membership fees");
    let travel = (CategoryId::new(), "Travel");

    let rows = vec![
        row(dec!(80.00), CategoryKind::Income, fees, (2026, 2, 28)),
        row(dec!(30.00), CategoryKind::Expense, travel, (2026, 1, 10)),
        row(dec!(100.00), CategoryKind::Income, fees, (2026, 1, 3)),
        row(dec!(10.00), CategoryKind::Expense, travel, (2025, 12, 31)),
    ];

    let months = ReportService::monthly(&rows);
    assert_eq!(months.len(), 3);

    assert_eq!((months[0].year, months[0].month), (2025, 12));
    assert_eq!(months[0].net, dec!(-10.00));

    assert_eq!((months[1].year, months[1].month), (2026, 1));
    assert_eq!(months[1].income, dec!(100.00));
    assert_eq!(months[1].expense, dec!(30.00));
    assert_eq!(months[1].net, dec!(70.00));

    assert_eq!((months[2].year, months[2].month), (2026, 2));
    assert_eq!(months[2].income, dec!(80.00));
}
