//! Income/expense category domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a category collects income or expense transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Money coming into the club (fees, sponsorship, ticket sales).
    Income,
    /// Money leaving the club (salaries, equipment, travel).
    Expense,
}

impl CategoryKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Error for unknown category kind strings.
#[derive(Debug, Error)]
#[error("Unknown category kind: {0}")]
pub struct UnknownCategoryKind(pub String);

impl std::str::FromStr for CategoryKind {
    type Err = UnknownCategoryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(UnknownCategoryKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            CategoryKind::from_str("income").unwrap(),
            CategoryKind::Income
        );
        assert_eq!(
            CategoryKind::from_str("EXPENSE").unwrap(),
            CategoryKind::Expense
        );
        assert!(CategoryKind::from_str("donation").is_err());
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&CategoryKind::Income).unwrap(),
            "\"income\""
        );
    }
}
