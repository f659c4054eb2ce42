//! Ledger entry domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubdesk_shared::types::AccountId;

/// Direction of a ledger entry.
///
/// The amount is always a positive magnitude; direction is carried here,
/// never by the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Credit entry (increases the account balance).
    Credit,
    /// Debit entry (decreases the account balance).
    Debit,
}

impl EntryType {
    /// Returns the wire name of the entry type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// A single entry in an account's history.
///
/// Entries are immutable once appended; the owning account's history is
/// append-only and insertion order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier, unique within the owning account. The two entries of a
    /// transfer share a correlation token with `-from`/`-to` suffixes.
    pub id: String,
    /// Whether this entry increases or decreases the balance.
    pub entry_type: EntryType,
    /// Positive magnitude of the balance change.
    pub amount: Decimal,
    /// Human-readable cause; synthesized for transfer-derived entries.
    pub description: String,
    /// Wall-clock time at commit.
    pub entry_date: DateTime<Utc>,
    /// Destination account, present only on the source side of a transfer.
    pub transfer_to_account: Option<AccountId>,
    /// Source account, present only on the destination side of a transfer.
    pub transfer_from_account: Option<AccountId>,
}

impl LedgerEntry {
    /// Builds a plain credit entry.
    #[must_use]
    pub fn credit(amount: Decimal, description: String, entry_date: DateTime<Utc>) -> Self {
        Self {
            id: correlation_token(),
            entry_type: EntryType::Credit,
            amount,
            description,
            entry_date,
            transfer_to_account: None,
            transfer_from_account: None,
        }
    }

    /// Builds a plain debit entry.
    #[must_use]
    pub fn debit(amount: Decimal, description: String, entry_date: DateTime<Utc>) -> Self {
        Self {
            id: correlation_token(),
            entry_type: EntryType::Debit,
            amount,
            description,
            entry_date,
            transfer_to_account: None,
            transfer_from_account: None,
        }
    }

    /// Returns true if this entry was generated by a transfer.
    #[must_use]
    pub const fn is_transfer(&self) -> bool {
        self.transfer_to_account.is_some() || self.transfer_from_account.is_some()
    }

    /// Returns the signed balance change this entry applied.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Credit => self.amount,
            EntryType::Debit => -self.amount,
        }
    }
}

/// Generates a fresh correlation token for entry ids.
///
/// Transfer entries append `-from`/`-to` to one shared token so the two
/// sides can be matched up later.
#[must_use]
pub fn correlation_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_amount() {
        let now = Utc::now();
        let credit = LedgerEntry::credit(dec!(25.00), "membership fee".into(), now);
        let debit = LedgerEntry::debit(dec!(10.00), "equipment".into(), now);

        assert_eq!(credit.signed_amount(), dec!(25.00));
        assert_eq!(debit.signed_amount(), dec!(-10.00));
    }

    #[test]
    fn test_plain_entries_are_not_transfers() {
        let entry = LedgerEntry::credit(dec!(1), "x".into(), Utc::now());
        assert!(!entry.is_transfer());
    }

    #[test]
    fn test_correlation_tokens_are_unique() {
        assert_ne!(correlation_token(), correlation_token());
    }
}
