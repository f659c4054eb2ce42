//! Mutation planning for account balances.
//!
//! This module provides the core business logic for balance mutations:
//! validation, new-balance computation, and entry construction. It is
//! pure — the database layer reads the snapshots, asks for a plan, and
//! commits the result atomically.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::entry::{EntryType, LedgerEntry, correlation_token};
use super::error::LedgerError;
use super::types::{AccountChange, AccountSnapshot, MutationPlan, MutationRequest};

/// Plans balance mutations against account snapshots.
///
/// Invariants enforced here:
/// - amounts are strictly positive,
/// - a balance never goes below zero,
/// - a transfer names a counterparty distinct from the source,
/// - every balance change is paired with exactly one appended entry.
pub struct LedgerService;

impl LedgerService {
    /// Plans a mutation for the target account.
    ///
    /// `counterparty` must be the snapshot of `request.transfer_to_account`
    /// when the request is a transfer, read in the same atomic unit as
    /// `target`; it is ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails. No state is touched on
    /// any error path — a plan either covers the full mutation or does
    /// not exist.
    pub fn plan(
        target: &AccountSnapshot,
        counterparty: Option<&AccountSnapshot>,
        request: &MutationRequest,
        now: DateTime<Utc>,
    ) -> Result<MutationPlan, LedgerError> {
        use super::types::MutationKind;

        if request.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        match request.kind {
            MutationKind::Credit => {
                Self::plan_credit(target, request.amount, request.description.clone(), now)
            }
            MutationKind::Debit => {
                Self::plan_debit(target, request.amount, request.description.clone(), now)
            }
            MutationKind::Transfer => {
                let destination = counterparty.ok_or(LedgerError::MissingCounterparty)?;
                Self::plan_transfer(target, destination, request.amount, &request.description, now)
            }
        }
    }

    /// Plans a credit: `balance' = balance + amount` plus one entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for non-positive amounts.
    pub fn plan_credit(
        target: &AccountSnapshot,
        amount: Decimal,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<MutationPlan, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(MutationPlan {
            changes: vec![AccountChange {
                account_id: target.id,
                new_balance: target.balance + amount,
                entry: LedgerEntry::credit(amount, description, now),
            }],
        })
    }

    /// Plans a debit: `balance' = balance - amount` plus one entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientBalance` when the balance does
    /// not cover the amount; the account is left untouched.
    pub fn plan_debit(
        target: &AccountSnapshot,
        amount: Decimal,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<MutationPlan, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let new_balance = target.balance - amount;
        if new_balance < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                balance: target.balance,
                requested: amount,
            });
        }

        Ok(MutationPlan {
            changes: vec![AccountChange {
                account_id: target.id,
                new_balance,
                entry: LedgerEntry::debit(amount, description, now),
            }],
        })
    }

    /// Plans a transfer: the source loses `amount` and gains a debit entry
    /// referencing the destination; the destination gains `amount` and a
    /// credit entry referencing the source. Both entries share one
    /// correlation token (`{token}-from` / `{token}-to`).
    ///
    /// # Errors
    ///
    /// Returns `SelfTransfer`, `InvalidAmount`, or `InsufficientBalance`.
    /// On any error neither account is part of a plan.
    pub fn plan_transfer(
        source: &AccountSnapshot,
        destination: &AccountSnapshot,
        amount: Decimal,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<MutationPlan, LedgerError> {
        if source.id == destination.id {
            return Err(LedgerError::SelfTransfer);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let source_balance = source.balance - amount;
        if source_balance < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                balance: source.balance,
                requested: amount,
            });
        }

        let token = correlation_token();

        let debit_entry = LedgerEntry {
            id: format!("{token}-from"),
            entry_type: EntryType::Debit,
            amount,
            description: transfer_description("to", &destination.name, description),
            entry_date: now,
            transfer_to_account: Some(destination.id),
            transfer_from_account: None,
        };

        let credit_entry = LedgerEntry {
            id: format!("{token}-to"),
            entry_type: EntryType::Credit,
            amount,
            description: transfer_description("from", &source.name, description),
            entry_date: now,
            transfer_to_account: None,
            transfer_from_account: Some(source.id),
        };

        Ok(MutationPlan {
            changes: vec![
                AccountChange {
                    account_id: source.id,
                    new_balance: source_balance,
                    entry: debit_entry,
                },
                AccountChange {
                    account_id: destination.id,
                    new_balance: destination.balance + amount,
                    entry: credit_entry,
                },
            ],
        })
    }
}

/// Synthesizes the description for one side of a transfer, referencing
/// the counterparty account by name.
fn transfer_description(direction: &str, counterparty_name: &str, description: &str) -> String {
    if description.is_empty() {
        format!("Transfer {direction} {counterparty_name}")
    } else {
        format!("Transfer {direction} {counterparty_name}: {description}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubdesk_shared::types::AccountId;
    use rust_decimal_macros::dec;

    use crate::ledger::types::MutationKind;

    fn account(name: &str, balance: Decimal) -> AccountSnapshot {
        AccountSnapshot {
            id: AccountId::new(),
            name: name.to_string(),
            balance,
        }
    }

    fn request(kind: MutationKind, amount: Decimal) -> MutationRequest {
        MutationRequest {
            amount,
            kind,
            description: String::new(),
            transfer_to_account: None,
        }
    }

    #[test]
    fn test_credit_from_zero() {
        // Crediting 50.00 to an empty account yields 50.00 and one entry.
        let a = account("Main", dec!(0.00));
        let plan = LedgerService::plan_credit(&a, dec!(50.00), "donation".into(), Utc::now())
            .unwrap();

        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.target().new_balance, dec!(50.00));
        assert_eq!(plan.target().entry.entry_type, EntryType::Credit);
        assert_eq!(plan.target().entry.amount, dec!(50.00));
        assert_eq!(plan.target().entry.description, "donation");
        assert!(!plan.target().entry.is_transfer());
    }

    #[test]
    fn test_debit_within_balance() {
        let a = account("Main", dec!(100.00));
        let plan =
            LedgerService::plan_debit(&a, dec!(40.00), "equipment".into(), Utc::now()).unwrap();

        assert_eq!(plan.target().new_balance, dec!(60.00));
        assert_eq!(plan.target().entry.entry_type, EntryType::Debit);
    }

    #[test]
    fn test_debit_rejected_when_insufficient() {
        // Debiting 150.00 from 100.00 fails and plans nothing.
        let a = account("Main", dec!(100.00));
        let result = LedgerService::plan_debit(&a, dec!(150.00), String::new(), Utc::now());

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance {
                balance,
                requested,
            }) if balance == dec!(100.00) && requested == dec!(150.00)
        ));
    }

    #[test]
    fn test_debit_to_exactly_zero_is_allowed() {
        let a = account("Main", dec!(75.00));
        let plan = LedgerService::plan_debit(&a, dec!(75.00), String::new(), Utc::now()).unwrap();
        assert_eq!(plan.target().new_balance, dec!(0.00));
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        let a = account("Main", dec!(100.00));

        for amount in [dec!(0), dec!(-5)] {
            assert!(matches!(
                LedgerService::plan_credit(&a, amount, String::new(), Utc::now()),
                Err(LedgerError::InvalidAmount)
            ));
            assert!(matches!(
                LedgerService::plan_debit(&a, amount, String::new(), Utc::now()),
                Err(LedgerError::InvalidAmount)
            ));
        }
    }

    #[test]
    fn test_transfer_conservation() {
        // A=1000.00, B=500.00, transfer 300.00 "rent":
        // A=700.00 with a debit referencing B, B=800.00 with a credit
        // referencing A.
        let a = account("Operations", dec!(1000.00));
        let b = account("Facilities", dec!(500.00));

        let plan =
            LedgerService::plan_transfer(&a, &b, dec!(300.00), "rent", Utc::now()).unwrap();

        assert_eq!(plan.changes.len(), 2);

        let source = plan.target();
        assert_eq!(source.account_id, a.id);
        assert_eq!(source.new_balance, dec!(700.00));
        assert_eq!(source.entry.entry_type, EntryType::Debit);
        assert_eq!(source.entry.amount, dec!(300.00));
        assert_eq!(source.entry.transfer_to_account, Some(b.id));
        assert_eq!(source.entry.description, "Transfer to Facilities: rent");

        let dest = plan.counterparty().unwrap();
        assert_eq!(dest.account_id, b.id);
        assert_eq!(dest.new_balance, dec!(800.00));
        assert_eq!(dest.entry.entry_type, EntryType::Credit);
        assert_eq!(dest.entry.amount, dec!(300.00));
        assert_eq!(dest.entry.transfer_from_account, Some(a.id));
        assert_eq!(dest.entry.description, "Transfer from Operations: rent");
    }

    #[test]
    fn test_transfer_entry_ids_share_correlation_token() {
        let a = account("A", dec!(10.00));
        let b = account("B", dec!(0.00));

        let plan = LedgerService::plan_transfer(&a, &b, dec!(10.00), "", Utc::now()).unwrap();

        let from_id = &plan.target().entry.id;
        let to_id = &plan.counterparty().unwrap().entry.id;

        let from_token = from_id.strip_suffix("-from").unwrap();
        let to_token = to_id.strip_suffix("-to").unwrap();
        assert_eq!(from_token, to_token);
        assert!(!from_token.is_empty());
    }

    #[test]
    fn test_transfer_insufficient_source_plans_nothing() {
        let a = account("A", dec!(100.00));
        let b = account("B", dec!(500.00));

        let result = LedgerService::plan_transfer(&a, &b, dec!(100.01), "", Utc::now());
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_self_transfer_rejected() {
        let a = account("A", dec!(100.00));
        let result = LedgerService::plan_transfer(&a, &a.clone(), dec!(10.00), "", Utc::now());
        assert!(matches!(result, Err(LedgerError::SelfTransfer)));
    }

    #[test]
    fn test_plan_dispatches_transfer_without_counterparty() {
        let a = account("A", dec!(100.00));
        let req = request(MutationKind::Transfer, dec!(10.00));

        let result = LedgerService::plan(&a, None, &req, Utc::now());
        assert!(matches!(result, Err(LedgerError::MissingCounterparty)));
    }

    #[test]
    fn test_plan_dispatches_credit_and_debit() {
        let a = account("A", dec!(100.00));

        let credit = LedgerService::plan(&a, None, &request(MutationKind::Credit, dec!(5)), Utc::now())
            .unwrap();
        assert_eq!(credit.target().new_balance, dec!(105));

        let debit = LedgerService::plan(&a, None, &request(MutationKind::Debit, dec!(5)), Utc::now())
            .unwrap();
        assert_eq!(debit.target().new_balance, dec!(95));
    }

    #[test]
    fn test_transfer_description_without_note() {
        let a = account("Operations", dec!(50.00));
        let b = account("Youth", dec!(0.00));

        let plan = LedgerService::plan_transfer(&a, &b, dec!(25.00), "", Utc::now()).unwrap();
        assert_eq!(plan.target().entry.description, "Transfer to Youth");
        assert_eq!(
            plan.counterparty().unwrap().entry.description,
            "Transfer from Operations"
        );
    }
}
