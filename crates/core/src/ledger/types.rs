//! Ledger domain types for mutation planning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubdesk_shared::types::AccountId;

use super::entry::LedgerEntry;

/// Kind of balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    /// Increase the account balance.
    Credit,
    /// Decrease the account balance.
    Debit,
    /// Move an amount to another account.
    Transfer,
}

/// A balance mutation request.
///
/// This is the payload shape the dashboard has always sent; the field
/// names are part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Positive amount to apply.
    pub amount: Decimal,
    /// Credit, debit, or transfer.
    #[serde(rename = "type")]
    pub kind: MutationKind,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Destination account for transfers.
    #[serde(rename = "transferToAccount", default)]
    pub transfer_to_account: Option<AccountId>,
}

/// Snapshot of an account read inside the atomic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// The account ID.
    pub id: AccountId,
    /// Display name, referenced by transfer descriptions.
    pub name: String,
    /// Balance at the time of the read.
    pub balance: Decimal,
}

/// One account's share of a mutation plan.
#[derive(Debug, Clone)]
pub struct AccountChange {
    /// The account to update.
    pub account_id: AccountId,
    /// Balance to write.
    pub new_balance: Decimal,
    /// Entry to append to the account's history.
    pub entry: LedgerEntry,
}

/// The full effect of a mutation: one change for a credit/debit, two for
/// a transfer. All changes commit together or not at all.
#[derive(Debug, Clone)]
pub struct MutationPlan {
    /// Per-account updates, target account first.
    pub changes: Vec<AccountChange>,
}

impl MutationPlan {
    /// Returns the change for the mutation's target account.
    #[must_use]
    pub fn target(&self) -> &AccountChange {
        &self.changes[0]
    }

    /// Returns the counterparty change of a transfer, if any.
    #[must_use]
    pub fn counterparty(&self) -> Option<&AccountChange> {
        self.changes.get(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mutation_request_wire_shape() {
        let json = r#"{
            "amount": "300.00",
            "type": "transfer",
            "description": "rent",
            "transferToAccount": "7f6f4c9e-1a0a-4c2b-9f3e-2b8f0a6d1c5e"
        }"#;

        let request: MutationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, MutationKind::Transfer);
        assert_eq!(request.amount, dec!(300.00));
        assert_eq!(request.description, "rent");
        assert!(request.transfer_to_account.is_some());
    }

    #[test]
    fn test_mutation_request_optional_fields_default() {
        let json = r#"{"amount": "50", "type": "credit"}"#;
        let request: MutationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, MutationKind::Credit);
        assert!(request.description.is_empty());
        assert!(request.transfer_to_account.is_none());
    }
}
