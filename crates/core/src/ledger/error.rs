//! Ledger error types.
//!
//! Business-rule failures (insufficient balance, bad input) are distinct
//! from transient store failures so callers can decide whether a retry is
//! sensible.

use rust_decimal::Decimal;
use thiserror::Error;

use clubdesk_shared::types::AccountId;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The account balance does not cover the requested amount.
    #[error("Insufficient balance: {balance} available, {requested} requested")]
    InsufficientBalance {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Amount the mutation asked for.
        requested: Decimal,
    },

    /// Transfer requested without a destination account.
    #[error("Transfer requires a destination account")]
    MissingCounterparty,

    /// Transfer source and destination are the same account.
    #[error("Cannot transfer an account to itself")]
    SelfTransfer,

    /// Concurrent mutation lost the optimistic version check.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    /// Transient store failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::MissingCounterparty => "MISSING_COUNTERPARTY",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Store(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount | Self::MissingCounterparty | Self::SelfTransfer => 400,
            Self::AccountNotFound(_) => 404,
            Self::InsufficientBalance { .. } => 422,
            Self::ConcurrentModification => 409,
            Self::Store(_) => 503,
        }
    }

    /// Returns true if retrying the same call may succeed.
    ///
    /// Business-rule failures are final; only races and transient store
    /// failures are worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification | Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InvalidAmount.error_code(), "INVALID_AMOUNT");
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new()).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                balance: dec!(10),
                requested: dec!(20),
            }
            .error_code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            LedgerError::MissingCounterparty.error_code(),
            "MISSING_COUNTERPARTY"
        );
        assert_eq!(LedgerError::SelfTransfer.error_code(), "SELF_TRANSFER");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InvalidAmount.http_status_code(), 400);
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                balance: dec!(1),
                requested: dec!(2),
            }
            .http_status_code(),
            422
        );
        assert_eq!(LedgerError::ConcurrentModification.http_status_code(), 409);
        assert_eq!(LedgerError::Store(String::new()).http_status_code(), 503);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LedgerError::ConcurrentModification.is_retryable());
        assert!(LedgerError::Store("connection reset".into()).is_retryable());
        assert!(!LedgerError::InvalidAmount.is_retryable());
        assert!(
            !LedgerError::InsufficientBalance {
                balance: dec!(1),
                requested: dec!(2),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientBalance {
            balance: dec!(100.00),
            requested: dec!(150.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: 100.00 available, 150.00 requested"
        );
    }
}
